//! Progress state and its persisted records
//!
//! The in-memory [`ProgressState`] is only mutated by the progress store. On
//! disk it is split over two JSON records: the progress record (experience,
//! badges, activity log) and the game-stats record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::levels::{Level, LevelLabel};
use crate::storage::{decode_json, keys};

/// Maximum number of entries kept in the activity log
pub const ACTIVITY_LOG_CAPACITY: usize = 50;

/// Version written into new progress records. Records without a version
/// field predate versioning and are read as version 1.
pub const PROGRESS_SCHEMA_VERSION: u32 = 2;

/// One XP-granting action in the activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "activity", alias = "description")]
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Strictly increasing across the log. Entries stored without one are
    /// numbered from their timestamp on restore.
    #[serde(default)]
    pub id: u64,
}

/// Bounded, newest-first activity history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    fn from_entries(mut entries: Vec<ActivityEntry>) -> Self {
        entries.truncate(ACTIVITY_LOG_CAPACITY);

        // Oldest first: fill in missing ids and keep them strictly increasing
        let mut previous: Option<u64> = None;
        for entry in entries.iter_mut().rev() {
            let mut id = if entry.id == 0 {
                u64::try_from(entry.timestamp.timestamp_millis()).unwrap_or(0)
            } else {
                entry.id
            };
            if let Some(previous) = previous {
                id = id.max(previous.saturating_add(1));
            }
            entry.id = id;
            previous = Some(id);
        }

        Self { entries }
    }

    /// Prepend an entry and drop whatever falls past the capacity
    fn record(&mut self, description: &str, now: DateTime<Utc>) -> &ActivityEntry {
        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.entries.first() {
            Some(newest) => now_ms.max(newest.id.saturating_add(1)),
            None => now_ms,
        };

        self.entries.insert(
            0,
            ActivityEntry {
                description: description.to_string(),
                timestamp: now,
                id,
            },
        );
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
        &self.entries[0]
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn newest(&self) -> Option<&ActivityEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityEntry> {
        self.entries.iter()
    }
}

/// Per-game statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    /// Best score per game id
    #[serde(deserialize_with = "lenient")]
    pub high_scores: BTreeMap<String, u64>,
    #[serde(deserialize_with = "lenient")]
    pub total_games_played: u64,
    /// Game-related achievement ids, in unlock order
    #[serde(deserialize_with = "lenient_list")]
    pub achievements: Vec<String>,
}

/// Progress record as stored under [`keys::PROGRESS`]
///
/// Field names match the records written before the schema was versioned so
/// that old data still loads. Each field decodes on its own: a bad value
/// falls back to that field's default instead of discarding the record.
/// Fields this version does not know are carried through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProgressRecord {
    #[serde(deserialize_with = "lenient_version")]
    pub version: u32,
    #[serde(
        rename = "xp",
        alias = "experience",
        deserialize_with = "lenient_experience"
    )]
    pub experience: u64,
    /// Informational only, recomputed from experience on restore
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub level: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub badges: Vec<String>,
    #[serde(
        rename = "activitiesLog",
        alias = "activityLog",
        deserialize_with = "lenient_list"
    )]
    pub activity_log: Vec<ActivityEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            version: 1,
            experience: 0,
            level: None,
            badges: Vec::new(),
            activity_log: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Any value that does not decode as `T` becomes `T::default()`
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable field in stored record: {}", e);
        T::default()
    }))
}

/// Keeps the list items that decode and drops the rest
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        tracing::warn!("Ignoring stored list that is not an array");
        return Ok(Vec::new());
    };

    let total = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if kept.len() < total {
        tracing::warn!("Dropped {} unreadable item(s) from stored list", total - kept.len());
    }
    Ok(kept)
}

fn lenient_version<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(1))
}

/// Accepts any JSON number; negative totals written by older builds clamp to 0
fn lenient_experience<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    if let Some(v) = raw.as_u64() {
        return Ok(v);
    }
    Ok(match raw.as_f64() {
        Some(v) if v.is_finite() && v > 0.0 => v as u64,
        Some(_) => 0,
        None => {
            tracing::warn!("Ignoring non-numeric stored experience: {}", raw);
            0
        }
    })
}

/// Experience, level, badges, activity history and game statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressState {
    experience: u64,
    level: LevelLabel,
    badges: Vec<String>,
    activity_log: ActivityLog,
    game_stats: GameStats,
    /// Stored fields this version does not use, written back as they were
    extra_fields: Map<String, Value>,
}

impl ProgressState {
    /// Rebuild state from the raw persisted records.
    ///
    /// Absent or malformed records leave the defaults in place; present records
    /// override only the fields they contain.
    pub fn restore(progress_blob: Option<&str>, game_stats_blob: Option<&str>) -> Self {
        let record = progress_blob.and_then(|raw| decode_json(keys::PROGRESS, raw));
        let game_stats = game_stats_blob.and_then(|raw| decode_json(keys::GAME_STATS, raw));
        Self::from_records(record, game_stats)
    }

    pub(crate) fn from_records(
        record: Option<ProgressRecord>,
        game_stats: Option<GameStats>,
    ) -> Self {
        let mut state = Self::default();

        if let Some(record) = record {
            if record.version > PROGRESS_SCHEMA_VERSION {
                tracing::warn!(
                    "Progress record has newer schema version {} (supported: {}), reading known fields",
                    record.version,
                    PROGRESS_SCHEMA_VERSION
                );
            }
            state.experience = record.experience;
            state.badges = dedup_preserving_order(record.badges);
            state.activity_log = ActivityLog::from_entries(record.activity_log);
            state.extra_fields = record.extra;
        }

        if let Some(mut game_stats) = game_stats {
            game_stats.achievements = dedup_preserving_order(game_stats.achievements);
            state.game_stats = game_stats;
        }

        state.level = Level::for_xp(state.experience).label;
        state
    }

    pub(crate) fn to_record(&self) -> ProgressRecord {
        ProgressRecord {
            version: PROGRESS_SCHEMA_VERSION,
            experience: self.experience,
            level: Some(self.level.as_str().to_string()),
            badges: self.badges.clone(),
            activity_log: self.activity_log.entries.clone(),
            extra: self.extra_fields.clone(),
        }
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn level(&self) -> LevelLabel {
        self.level
    }

    pub fn badges(&self) -> &[String] {
        &self.badges
    }

    pub fn activity_log(&self) -> &ActivityLog {
        &self.activity_log
    }

    pub fn game_stats(&self) -> &GameStats {
        &self.game_stats
    }

    /// Add XP and re-derive the level. Fails without side effects on overflow.
    pub(super) fn add_experience(&mut self, amount: u64) -> Option<u64> {
        let total = self.experience.checked_add(amount)?;
        self.experience = total;
        self.level = Level::for_xp(total).label;
        Some(total)
    }

    pub(super) fn log_activity(&mut self, description: &str, now: DateTime<Utc>) -> &ActivityEntry {
        self.activity_log.record(description, now)
    }

    /// Append a badge id; returns false if it was already present
    pub(super) fn add_badge(&mut self, id: &str) -> bool {
        if self.badges.iter().any(|b| b == id) {
            return false;
        }
        self.badges.push(id.to_string());
        true
    }

    pub(super) fn game_stats_mut(&mut self) -> &mut GameStats {
        &mut self.game_stats
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_absent_yields_defaults() {
        assert_eq!(ProgressState::restore(None, None), ProgressState::default());

        let state = ProgressState::default();
        assert_eq!(state.experience(), 0);
        assert_eq!(state.level(), LevelLabel::CyberRookie);
        assert!(state.badges().is_empty());
        assert!(state.activity_log().is_empty());
        assert_eq!(state.game_stats(), &GameStats::default());
    }

    #[test]
    fn test_restore_partial_record() {
        let state = ProgressState::restore(Some(r#"{"xp": 260}"#), None);
        assert_eq!(state.experience(), 260);
        assert_eq!(state.level(), LevelLabel::SecurityExpert);
        assert!(state.badges().is_empty());
        assert!(state.activity_log().is_empty());
        assert_eq!(state.game_stats(), &GameStats::default());
    }

    #[test]
    fn test_restore_ignores_stored_level_label() {
        let state = ProgressState::restore(Some(r#"{"xp": 10, "level": "CYBER_MASTER"}"#), None);
        assert_eq!(state.level(), LevelLabel::CyberRookie);
    }

    #[test]
    fn test_restore_malformed_blobs_degrade_to_defaults() {
        let state = ProgressState::restore(Some("{\"xp\": "), Some("[]"));
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn test_restore_legacy_record() {
        let legacy = r#"{
            "xp": -14,
            "level": "CYBER_ROOKIE",
            "badges": ["xp-hunter", "xp-hunter"],
            "labsCompleted": [],
            "gamesPlayed": [],
            "activitiesLog": [
                {"activity": "Completed cyber memory challenge", "timestamp": "2024-03-01T10:00:00.000Z", "id": 1709287200000}
            ]
        }"#;
        let state = ProgressState::restore(Some(legacy), Some(r#"{"totalGamesPlayed": 3}"#));

        assert_eq!(state.experience(), 0);
        assert_eq!(state.badges(), &["xp-hunter".to_string()]);
        assert_eq!(state.activity_log().len(), 1);
        assert_eq!(
            state.activity_log().entries()[0].description,
            "Completed cyber memory challenge"
        );
        assert_eq!(state.game_stats().total_games_played, 3);
        assert!(state.game_stats().high_scores.is_empty());
    }

    #[test]
    fn test_restore_truncates_oversized_log() {
        let entries: Vec<ActivityEntry> = (0..80u64)
            .map(|i| ActivityEntry {
                description: format!("entry {}", i),
                timestamp: Utc::now(),
                id: 1000 - i,
            })
            .collect();
        let record = ProgressRecord {
            activity_log: entries,
            ..ProgressRecord::default()
        };
        let raw = serde_json::to_string(&record).unwrap();

        let state = ProgressState::restore(Some(&raw), None);
        assert_eq!(state.activity_log().len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(state.activity_log().entries()[0].description, "entry 0");
    }

    #[test]
    fn test_record_roundtrip_writes_current_version() {
        let mut state = ProgressState::default();
        state.add_experience(120);
        state.log_activity("Used hash calculator", Utc::now());
        state.add_badge("xp-hunter");

        let raw = serde_json::to_string(&state.to_record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], PROGRESS_SCHEMA_VERSION);
        assert_eq!(value["xp"], 120);
        assert_eq!(value["level"], "CYBER_SPECIALIST");
        assert_eq!(value["activitiesLog"][0]["activity"], "Used hash calculator");

        let restored = ProgressState::restore(Some(&raw), None);
        assert_eq!(restored, state);
    }

    #[test]
    fn test_log_ids_strictly_increase_within_same_millisecond() {
        let mut log = ActivityLog::default();
        let now = Utc::now();
        let first = log.record("a", now).id;
        let second = log.record("b", now).id;
        let third = log.record("c", now).id;
        assert!(first < second && second < third);
        assert_eq!(log.newest().map(|e| e.description.as_str()), Some("c"));
    }

    #[test]
    fn test_restore_entry_without_id_keeps_rest_of_record() {
        let raw = r#"{
            "xp": 300,
            "badges": ["xp-hunter"],
            "activitiesLog": [
                {"activity": "Used hash calculator", "timestamp": "2024-03-01T12:00:00.000Z"}
            ]
        }"#;
        let state = ProgressState::restore(Some(raw), None);

        assert_eq!(state.experience(), 300);
        assert_eq!(state.badges(), &["xp-hunter".to_string()]);
        let entry = &state.activity_log().entries()[0];
        assert_eq!(entry.description, "Used hash calculator");
        assert_eq!(entry.id, 1_709_294_400_000);
    }

    #[test]
    fn test_restore_drops_only_unreadable_items() {
        let raw = r#"{
            "xp": "lots",
            "badges": ["xp-hunter", 7, null, "cyber-ninja"],
            "activitiesLog": [
                {"activity": "newest", "timestamp": "2024-03-01T12:00:02Z", "id": 5},
                {"activity": "no timestamp", "id": 4},
                "not an entry",
                {"description": "oldest", "timestamp": "2024-03-01T12:00:00Z", "id": 9}
            ]
        }"#;
        let state = ProgressState::restore(Some(raw), Some(r#"{"totalGamesPlayed": "x", "achievements": ["game-player"]}"#));

        assert_eq!(state.experience(), 0);
        assert_eq!(
            state.badges(),
            &["xp-hunter".to_string(), "cyber-ninja".to_string()]
        );
        let log = state.activity_log().entries();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].description, "newest");
        assert_eq!(log[1].description, "oldest");
        // Out-of-order stored ids are raised so newer entries stay higher
        assert_eq!(log[1].id, 9);
        assert_eq!(log[0].id, 10);
        assert_eq!(state.game_stats().total_games_played, 0);
        assert_eq!(state.game_stats().achievements, vec!["game-player".to_string()]);
    }

    #[test]
    fn test_unknown_fields_survive_rewrite() {
        let raw = r#"{"xp": 40, "labsCompleted": ["lab-1"], "gamesPlayed": [{"game": "snake"}]}"#;
        let mut state = ProgressState::restore(Some(raw), None);
        state.add_experience(10);

        let value = serde_json::to_value(state.to_record()).unwrap();
        assert_eq!(value["xp"], 50);
        assert_eq!(value["labsCompleted"], serde_json::json!(["lab-1"]));
        assert_eq!(value["gamesPlayed"][0]["game"], "snake");
    }

    #[test]
    fn test_add_experience_overflow_leaves_state_untouched() {
        let mut state = ProgressState::default();
        state.add_experience(u64::MAX - 1);
        assert_eq!(state.add_experience(5), None);
        assert_eq!(state.experience(), u64::MAX - 1);
    }
}
