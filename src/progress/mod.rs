//! Progression: experience, levels, badges, activity log and game statistics
//!
//! [`ProgressStore`] is the single writer of [`ProgressState`]. Every XP
//! grant goes through [`ProgressStore::award_experience`], which updates the
//! level, logs the activity, unlocks achievements and persists the result
//! before returning.
//!
//! # Usage
//!
//! ```ignore
//! let mut progress = ProgressStore::restore(store);
//! let events = progress.award_experience(25, "System authentication successful")?;
//! let snapshot = progress.snapshot();
//! ```

mod achievements;
mod events;
mod levels;
mod rewards;
mod state;

pub use achievements::{
    ACHIEVEMENTS, Achievement, AchievementCategory, AchievementContext, AchievementId,
    AchievementStatus,
};
pub use events::{LevelUp, ProgressEvent, UnlockedAchievement};
pub use levels::{LEVELS, Level, LevelLabel, LevelProgress};
pub use rewards::{Activity, XpRewards};
pub use state::{
    ACTIVITY_LOG_CAPACITY, ActivityEntry, ActivityLog, GameStats, PROGRESS_SCHEMA_VERSION,
    ProgressState,
};

use std::sync::mpsc::Receiver;

use chrono::Utc;

use crate::storage::{SharedStore, keys, load_raw, save_json_best_effort};
use events::Subscribers;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("Activity description must not be empty")]
    EmptyDescription,

    #[error("Awarding {amount} XP would overflow the experience counter")]
    ExperienceOverflow { amount: u64 },
}

/// Read model for profile and header widgets
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub experience: u64,
    pub level: LevelLabel,
    pub level_progress: LevelProgress,
    pub badge_count: usize,
    pub total_games_played: u64,
    pub activity_log: Vec<ActivityEntry>,
}

/// Owner of the progress state and its persistence
pub struct ProgressStore {
    state: ProgressState,
    store: SharedStore,
    has_identity: bool,
    subscribers: Subscribers,
}

impl ProgressStore {
    /// Zero-value state bound to `store`; nothing is read
    pub fn new(store: SharedStore) -> Self {
        Self {
            state: ProgressState::default(),
            store,
            has_identity: false,
            subscribers: Subscribers::default(),
        }
    }

    /// Load persisted progress over the defaults. Never fails: missing or
    /// malformed records fall back to defaults.
    pub fn restore(store: SharedStore) -> Self {
        let progress = load_raw(store.as_ref(), keys::PROGRESS);
        let game_stats = load_raw(store.as_ref(), keys::GAME_STATS);
        let state = ProgressState::restore(progress.as_deref(), game_stats.as_deref());

        tracing::debug!(
            "Restored progress: {} XP ({}), {} badges, {} log entries",
            state.experience(),
            state.level(),
            state.badges().len(),
            state.activity_log().len()
        );

        Self {
            state,
            ..Self::new(store)
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Tell the store whether an identity is currently established
    pub fn set_identity_present(&mut self, present: bool) {
        self.has_identity = present;
    }

    pub fn subscribe(&mut self) -> Receiver<ProgressEvent> {
        self.subscribers.subscribe()
    }

    /// Award XP for a named activity.
    ///
    /// On success the activity is logged, the level recomputed, newly earned
    /// achievements recorded, and the progress record written. Storage
    /// failures are logged, not returned.
    pub fn award_experience(
        &mut self,
        amount: u64,
        description: &str,
    ) -> Result<Vec<ProgressEvent>, ProgressError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ProgressError::EmptyDescription);
        }

        let old_level = self.state.level();
        let total = self
            .state
            .add_experience(amount)
            .ok_or(ProgressError::ExperienceOverflow { amount })?;
        self.state.log_activity(description, Utc::now());

        let mut events = vec![ProgressEvent::XpAwarded {
            amount,
            description: description.to_string(),
            total,
        }];

        let new_level = self.state.level();
        if new_level != old_level {
            tracing::info!("Level up: {} -> {}", old_level, new_level);
            events.push(ProgressEvent::LevelUp(LevelUp {
                old_level,
                new_level,
            }));
        }

        let (unlocked, game_stats_changed) = self.sync_unlocks();
        events.extend(unlocked);

        self.persist_progress();
        if game_stats_changed {
            self.persist_game_stats();
        }

        tracing::debug!("+{} XP for '{}' (total {})", amount, description, total);
        self.subscribers.publish(&events);
        Ok(events)
    }

    /// Award the reward attached to a known activity
    pub fn award_activity(&mut self, activity: Activity) -> Result<Vec<ProgressEvent>, ProgressError> {
        self.award_experience(activity.xp(), activity.description())
    }

    /// Count a started game. Grants no XP.
    pub fn record_game_played(&mut self, game_id: &str) -> Vec<ProgressEvent> {
        let stats = self.state.game_stats_mut();
        stats.total_games_played = stats.total_games_played.saturating_add(1);
        let total_games_played = stats.total_games_played;

        let mut events = vec![ProgressEvent::GamePlayed {
            game_id: game_id.to_string(),
            total_games_played,
        }];

        let (unlocked, _) = self.sync_unlocks();
        let badges_changed = !unlocked.is_empty();
        events.extend(unlocked);

        self.persist_game_stats();
        if badges_changed {
            self.persist_progress();
        }

        self.subscribers.publish(&events);
        events
    }

    /// Keep the best score per game. Returns true for a new best.
    pub fn record_high_score(&mut self, game_id: &str, score: u64) -> bool {
        let stats = self.state.game_stats_mut();
        let is_best = stats
            .high_scores
            .get(game_id)
            .is_none_or(|best| score > *best);
        if !is_best {
            return false;
        }

        stats.high_scores.insert(game_id.to_string(), score);
        self.persist_game_stats();
        self.subscribers.publish(&[ProgressEvent::HighScore {
            game_id: game_id.to_string(),
            score,
        }]);
        true
    }

    /// Restore the zero-value defaults and persist them
    pub fn reset(&mut self) {
        self.state = ProgressState::default();
        self.persist_progress();
        self.persist_game_stats();
        tracing::info!("Progress reset");
        self.subscribers.publish(&[ProgressEvent::Reset]);
    }

    fn achievement_context(&self) -> AchievementContext {
        AchievementContext {
            experience: self.state.experience(),
            total_games_played: self.state.game_stats().total_games_played,
            has_identity: self.has_identity,
        }
    }

    /// Fresh evaluation of every achievement; nothing is cached
    pub fn achievements(&self) -> Vec<AchievementStatus> {
        achievements::evaluate(&self.achievement_context())
    }

    pub fn earned_count(&self) -> usize {
        self.achievements().iter().filter(|s| s.earned).count()
    }

    /// Record newly earned achievements as badges.
    /// Returns the unlock events and whether game stats were touched.
    fn sync_unlocks(&mut self) -> (Vec<ProgressEvent>, bool) {
        let ctx = self.achievement_context();
        let new_ids = achievements::check_new_unlocks(&ctx, self.state.badges());

        let mut events = Vec::new();
        let mut game_stats_changed = false;
        for id in new_ids {
            let achievement = Achievement::get(id);
            self.state.add_badge(id.as_str());

            if achievement.category == AchievementCategory::Games {
                let stats = self.state.game_stats_mut();
                if !stats.achievements.iter().any(|a| a == id.as_str()) {
                    stats.achievements.push(id.as_str().to_string());
                    game_stats_changed = true;
                }
            }

            tracing::info!("Achievement unlocked: {} {}", achievement.icon, achievement.name);
            events.push(ProgressEvent::AchievementUnlocked(UnlockedAchievement {
                achievement,
                unlocked_at: Utc::now(),
            }));
        }

        (events, game_stats_changed)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            experience: self.state.experience(),
            level: self.state.level(),
            level_progress: LevelProgress::new(self.state.experience()),
            badge_count: self.state.badges().len(),
            total_games_played: self.state.game_stats().total_games_played,
            activity_log: self.state.activity_log().entries().to_vec(),
        }
    }

    fn persist_progress(&self) {
        save_json_best_effort(self.store.as_ref(), keys::PROGRESS, &self.state.to_record());
    }

    fn persist_game_stats(&self) {
        save_json_best_effort(self.store.as_ref(), keys::GAME_STATS, self.state.game_stats());
    }
}
