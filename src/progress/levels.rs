//! Level system
//!
//! Defines level thresholds and labels, and derives the level for an XP total.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Level label shown in profile and header widgets
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelLabel {
    #[default]
    CyberRookie,
    DigitalWarrior,
    CyberSpecialist,
    SecurityExpert,
    EliteHacker,
    CyberMaster,
}

impl LevelLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CyberRookie => "CYBER_ROOKIE",
            Self::DigitalWarrior => "DIGITAL_WARRIOR",
            Self::CyberSpecialist => "CYBER_SPECIALIST",
            Self::SecurityExpert => "SECURITY_EXPERT",
            Self::EliteHacker => "ELITE_HACKER",
            Self::CyberMaster => "CYBER_MASTER",
        }
    }
}

impl fmt::Display for LevelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level definition
#[derive(Debug, Clone)]
pub struct Level {
    pub rank: u32,
    pub xp_required: u64,
    pub label: LevelLabel,
}

/// All level definitions (must be sorted by rank, first one at 0 XP)
pub static LEVELS: &[Level] = &[
    Level {
        rank: 1,
        xp_required: 0,
        label: LevelLabel::CyberRookie,
    },
    Level {
        rank: 2,
        xp_required: 50,
        label: LevelLabel::DigitalWarrior,
    },
    Level {
        rank: 3,
        xp_required: 100,
        label: LevelLabel::CyberSpecialist,
    },
    Level {
        rank: 4,
        xp_required: 250,
        label: LevelLabel::SecurityExpert,
    },
    Level {
        rank: 5,
        xp_required: 500,
        label: LevelLabel::EliteHacker,
    },
    Level {
        rank: 6,
        xp_required: 1000,
        label: LevelLabel::CyberMaster,
    },
];

impl Level {
    /// Highest level whose threshold is satisfied by `xp`
    pub fn for_xp(xp: u64) -> &'static Level {
        LEVELS
            .iter()
            .rev()
            .find(|l| xp >= l.xp_required)
            .unwrap_or(&LEVELS[0])
    }

    /// Get XP needed for the level after `rank` (None if max level)
    pub fn xp_for_next(rank: u32) -> Option<u64> {
        LEVELS
            .iter()
            .find(|l| l.rank == rank + 1)
            .map(|l| l.xp_required)
    }

    pub fn max_rank() -> u32 {
        LEVELS.last().map(|l| l.rank).unwrap_or(1)
    }
}

/// Where an XP total sits between its level and the next one
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProgress {
    pub total_xp: u64,
    pub label: LevelLabel,
    pub rank: u32,
    pub current_level_xp: u64,
    /// None at max level
    pub next_level_xp: Option<u64>,
}

impl LevelProgress {
    pub fn new(total_xp: u64) -> Self {
        let level = Level::for_xp(total_xp);
        Self {
            total_xp,
            label: level.label,
            rank: level.rank,
            current_level_xp: level.xp_required,
            next_level_xp: Level::xp_for_next(level.rank),
        }
    }

    /// Progress to next level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        match self.next_level_xp {
            Some(next) => {
                let xp_in_level = self.total_xp - self.current_level_xp;
                let xp_for_level = next - self.current_level_xp;
                if xp_for_level == 0 {
                    1.0
                } else {
                    (xp_in_level as f32) / (xp_for_level as f32)
                }
            }
            None => 1.0,
        }
    }

    pub fn is_max_level(&self) -> bool {
        self.next_level_xp.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        let cases = [
            (0, LevelLabel::CyberRookie),
            (49, LevelLabel::CyberRookie),
            (50, LevelLabel::DigitalWarrior),
            (99, LevelLabel::DigitalWarrior),
            (100, LevelLabel::CyberSpecialist),
            (249, LevelLabel::CyberSpecialist),
            (250, LevelLabel::SecurityExpert),
            (499, LevelLabel::SecurityExpert),
            (500, LevelLabel::EliteHacker),
            (999, LevelLabel::EliteHacker),
            (1000, LevelLabel::CyberMaster),
            (1001, LevelLabel::CyberMaster),
            (u64::MAX, LevelLabel::CyberMaster),
        ];

        for (xp, expected) in cases {
            assert_eq!(Level::for_xp(xp).label, expected, "xp = {}", xp);
        }
    }

    #[test]
    fn test_levels_table_is_sorted() {
        assert_eq!(LEVELS[0].xp_required, 0);
        for pair in LEVELS.windows(2) {
            assert!(pair[0].xp_required < pair[1].xp_required);
            assert_eq!(pair[0].rank + 1, pair[1].rank);
            assert!(pair[0].label < pair[1].label);
        }
        assert_eq!(Level::max_rank(), 6);
    }

    #[test]
    fn test_label_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&LevelLabel::SecurityExpert).unwrap();
        assert_eq!(json, "\"SECURITY_EXPERT\"");
        assert_eq!(LevelLabel::EliteHacker.to_string(), "ELITE_HACKER");
    }

    #[test]
    fn test_level_progress() {
        let progress = LevelProgress::new(75); // Between 50 and 100
        assert_eq!(progress.label, LevelLabel::DigitalWarrior);
        assert_eq!(progress.next_level_xp, Some(100));
        assert!((progress.progress_to_next() - 0.5).abs() < 0.01);

        let maxed = LevelProgress::new(5000);
        assert!(maxed.is_max_level());
        assert_eq!(maxed.progress_to_next(), 1.0);
    }
}
