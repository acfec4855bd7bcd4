//! Cancelable timer tasks owned by a view
//!
//! A [`TaskScope`] spawns tokio tasks and aborts every one of them when it is
//! canceled or dropped. A scope is bound to the runtime it was created in;
//! creating one outside a runtime is an error rather than a panic.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Timers need a tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Handle to a single scheduled task
#[derive(Debug)]
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[derive(Debug)]
pub struct TaskScope {
    runtime: Handle,
    tasks: Vec<TaskHandle>,
}

impl TaskScope {
    /// Scope on the runtime the caller is running in
    pub fn try_current() -> Result<Self, ScheduleError> {
        Ok(Self::on(Handle::try_current()?))
    }

    pub fn on(runtime: Handle) -> Self {
        Self {
            runtime,
            tasks: Vec::new(),
        }
    }

    /// Run `task` once after `delay`
    pub fn spawn_after<F>(&mut self, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }

    /// Run `task` every `period`, first after one full period
    pub fn spawn_repeating<F>(&mut self, period: Duration, mut task: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                task();
            }
        });
    }

    fn spawn<Fut>(&mut self, future: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(TaskHandle {
            handle: self.runtime.spawn(future),
        });
    }

    /// Tasks spawned and not yet finished
    pub fn active(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            tracing::debug!("Canceling {} scheduled task(s)", self.tasks.len());
        }
        for task in self.tasks.drain(..) {
            task.cancel();
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_spawn_after_runs_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scope = TaskScope::try_current().unwrap();

        let c = counter.clone();
        scope.spawn_after(Duration::from_millis(10), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_before_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scope = TaskScope::try_current().unwrap();

        let c = counter.clone();
        scope.spawn_after(Duration::from_millis(200), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        scope.cancel_all();

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeating_stops_on_drop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scope = TaskScope::try_current().unwrap();

        let c = counter.clone();
        scope.spawn_repeating(Duration::from_millis(10), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(scope);
        let seen = counter.load(Ordering::SeqCst);
        assert!(seen >= 2, "expected several ticks, got {}", seen);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), seen);
    }

    #[test]
    fn test_scope_outside_runtime_is_an_error() {
        let err = TaskScope::try_current().unwrap_err();
        assert!(matches!(err, ScheduleError::NoRuntime(_)));
    }

    #[test]
    fn test_scope_on_explicit_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scope = TaskScope::on(runtime.handle().clone());

        let c = counter.clone();
        scope.spawn_after(Duration::from_millis(5), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        runtime.block_on(async { tokio::time::sleep(Duration::from_millis(50)).await });
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
