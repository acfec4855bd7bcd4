//! Achievement definitions and unlock checks
//!
//! Achievements are pure predicates over the current progress. They are
//! re-evaluated on every request; the only thing ever stored is the id of an
//! achievement the first time it was seen as earned.

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstLogin,
    GamePlayer,
    XpHunter,
    CyberNinja,
}

impl AchievementId {
    /// String ID used in persisted badge lists
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstLogin => "first-login",
            Self::GamePlayer => "game-player",
            Self::XpHunter => "xp-hunter",
            Self::CyberNinja => "cyber-ninja",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first-login" => Some(Self::FirstLogin),
            "game-player" => Some(Self::GamePlayer),
            "xp-hunter" => Some(Self::XpHunter),
            "cyber-ninja" => Some(Self::CyberNinja),
            _ => None,
        }
    }

    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstLogin,
            Self::GamePlayer,
            Self::XpHunter,
            Self::CyberNinja,
        ]
    }
}

/// Achievement category for grouping in the profile view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    Access,
    Games,
    Experience,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Access => "Access",
            Self::Games => "Games",
            Self::Experience => "Experience",
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstLogin,
        name: "System Access",
        description: "Sign in or create an account",
        icon: "🔓",
        category: AchievementCategory::Access,
    },
    Achievement {
        id: AchievementId::GamePlayer,
        name: "Game Master",
        description: "Play any game",
        icon: "🎮",
        category: AchievementCategory::Games,
    },
    Achievement {
        id: AchievementId::XpHunter,
        name: "XP Hunter",
        description: "Reach 100 XP",
        icon: "⭐",
        category: AchievementCategory::Experience,
    },
    Achievement {
        id: AchievementId::CyberNinja,
        name: "Cyber Ninja",
        description: "Reach 500 XP",
        icon: "🥷",
        category: AchievementCategory::Experience,
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .expect("All achievements should be defined")
    }

    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}

/// Inputs the achievement predicates look at
#[derive(Debug, Clone, Copy, Default)]
pub struct AchievementContext {
    pub experience: u64,
    pub total_games_played: u64,
    pub has_identity: bool,
}

/// Whether a single achievement is currently earned
pub fn is_earned(id: AchievementId, ctx: &AchievementContext) -> bool {
    match id {
        AchievementId::FirstLogin => ctx.has_identity,
        AchievementId::GamePlayer => ctx.total_games_played > 0,
        AchievementId::XpHunter => ctx.experience >= 100,
        AchievementId::CyberNinja => ctx.experience >= 500,
    }
}

/// Earned achievements whose ids are not yet in `unlocked`
pub fn check_new_unlocks(ctx: &AchievementContext, unlocked: &[String]) -> Vec<AchievementId> {
    AchievementId::all()
        .iter()
        .copied()
        .filter(|id| is_earned(*id, ctx))
        .filter(|id| !unlocked.iter().any(|u| u == id.as_str()))
        .collect()
}

/// One row of the achievements grid
#[derive(Debug, Clone)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub earned: bool,
}

/// Fresh evaluation of every achievement
pub fn evaluate(ctx: &AchievementContext) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| AchievementStatus {
            achievement,
            earned: is_earned(achievement.id, ctx),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ids_defined_and_parse_back() {
        assert_eq!(Achievement::total_count(), AchievementId::all().len());
        for id in AchievementId::all() {
            assert_eq!(Achievement::get(*id).id, *id);
            assert_eq!(AchievementId::parse(id.as_str()), Some(*id));
        }
        assert_eq!(AchievementId::parse("unknown"), None);
    }

    #[test]
    fn test_predicates() {
        let mut ctx = AchievementContext::default();
        assert!(evaluate(&ctx).iter().all(|s| !s.earned));

        ctx.experience = 100;
        assert!(is_earned(AchievementId::XpHunter, &ctx));
        assert!(!is_earned(AchievementId::CyberNinja, &ctx));

        ctx.experience = 500;
        ctx.total_games_played = 1;
        ctx.has_identity = true;
        assert!(evaluate(&ctx).iter().all(|s| s.earned));
    }

    #[test]
    fn test_check_new_unlocks_skips_known() {
        let ctx = AchievementContext {
            experience: 150,
            total_games_played: 2,
            has_identity: false,
        };
        let unlocked = vec!["game-player".to_string()];

        let new = check_new_unlocks(&ctx, &unlocked);
        assert_eq!(new, vec![AchievementId::XpHunter]);
    }
}
