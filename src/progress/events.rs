//! Progress events and subscribers

use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Utc};

use super::achievements::Achievement;
use super::levels::LevelLabel;

/// An achievement that was just unlocked
#[derive(Debug, Clone)]
pub struct UnlockedAchievement {
    pub achievement: &'static Achievement,
    pub unlocked_at: DateTime<Utc>,
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: LevelLabel,
    pub new_level: LevelLabel,
}

/// Everything a view may want to react to
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    XpAwarded {
        amount: u64,
        description: String,
        total: u64,
    },
    LevelUp(LevelUp),
    AchievementUnlocked(UnlockedAchievement),
    GamePlayed {
        game_id: String,
        total_games_played: u64,
    },
    HighScore {
        game_id: String,
        score: u64,
    },
    Reset,
}

/// Fan-out of events to channel subscribers
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<ProgressEvent>>,
}

impl Subscribers {
    pub fn subscribe(&mut self) -> Receiver<ProgressEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Deliver events in order; subscribers whose receiver is gone are dropped
    pub fn publish(&mut self, events: &[ProgressEvent]) {
        if events.is_empty() {
            return;
        }
        self.senders
            .retain(|tx| events.iter().all(|event| tx.send(event.clone()).is_ok()));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.senders.len()
    }
}
