//! Board view for the memory game
//!
//! The view owns the game and every timer attached to it. A mismatched pair
//! is turned back over after the conceal delay and the clock text refreshes on
//! each tick. Starting a new game or dropping the view cancels both.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::GameSettings;
use crate::schedule::{ScheduleError, TaskScope};

use super::memory::{FlipOutcome, MemoryGame, format_clock};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct BoardView {
    game: Arc<Mutex<MemoryGame>>,
    clock: Arc<Mutex<String>>,
    settings: GameSettings,
    scope: TaskScope,
}

impl BoardView {
    /// Start a shuffled game. Fails outside a tokio runtime.
    pub fn start(settings: GameSettings) -> Result<Self, ScheduleError> {
        Self::start_with(settings, MemoryGame::new())
    }

    pub fn start_with(settings: GameSettings, game: MemoryGame) -> Result<Self, ScheduleError> {
        let mut view = Self {
            game: Arc::new(Mutex::new(game)),
            clock: Arc::new(Mutex::new(format_clock(Default::default()))),
            settings,
            scope: TaskScope::try_current()?,
        };
        view.start_clock();
        Ok(view)
    }

    /// Replace the current game, canceling its timers
    pub fn new_game(&mut self) {
        self.reset_with(MemoryGame::new());
    }

    pub fn reset_with(&mut self, game: MemoryGame) {
        self.scope.cancel_all();
        *lock(&self.game) = game;
        *lock(&self.clock) = format_clock(Default::default());
        self.start_clock();
    }

    fn start_clock(&mut self) {
        let game = self.game.clone();
        let clock = self.clock.clone();
        self.scope.spawn_repeating(self.settings.clock_tick(), move || {
            let text = lock(&game).clock();
            *lock(&clock) = text;
        });
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        let outcome = lock(&self.game).flip(index);

        match &outcome {
            FlipOutcome::Mismatched { .. } => {
                let game = self.game.clone();
                self.scope
                    .spawn_after(self.settings.conceal_delay(), move || {
                        lock(&game).conceal();
                    });
            }
            FlipOutcome::Completed { .. } => {
                let final_clock = lock(&self.game).clock();
                *lock(&self.clock) = final_clock;
                self.scope.cancel_all();
            }
            _ => {}
        }

        outcome
    }

    /// Clock text as of the last tick
    pub fn clock(&self) -> String {
        lock(&self.clock).clone()
    }

    /// Read the game under its lock
    pub fn with_game<R>(&self, f: impl FnOnce(&MemoryGame) -> R) -> R {
        f(&lock(&self.game))
    }

    /// Scheduled tasks still running
    pub fn active_tasks(&self) -> usize {
        self.scope.active()
    }
}
