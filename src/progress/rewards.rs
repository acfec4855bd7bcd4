//! XP rewards for user actions
//!
//! Every action that grants experience is listed here together with the
//! description written to the activity log.

/// XP amounts per action
pub struct XpRewards;

impl XpRewards {
    pub const LOGIN: u64 = 25;
    pub const SIGNUP: u64 = 50;
    pub const PASSWORD_GENERATED: u64 = 5;
    pub const HASH_CALCULATED: u64 = 10;
    pub const AI_CHAT: u64 = 5;
    pub const MEME_CREATED: u64 = 5;
    pub const JOKE_GENERATED: u64 = 2;
    pub const MATRIX_MODE: u64 = 10;
    pub const HACKER_SCREEN: u64 = 5;
    pub const VIRUS_SCAN: u64 = 5;
    pub const SYSTEM_UPDATE: u64 = 5;
    pub const KONAMI_CODE: u64 = 100;
    pub const TERMINAL_MODE: u64 = 15;

    /// Base XP for finishing the memory game before move penalties
    pub const MEMORY_GAME_BASE: u64 = 100;

    /// XP lost per move in the memory game
    pub const MEMORY_GAME_MOVE_PENALTY: u64 = 2;

    /// Memory game completion reward: `max(0, 100 - 2 * moves)`
    pub fn memory_game(moves: u32) -> u64 {
        Self::MEMORY_GAME_BASE
            .saturating_sub(Self::MEMORY_GAME_MOVE_PENALTY.saturating_mul(u64::from(moves)))
    }
}

/// An XP-granting user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Login,
    Signup,
    PasswordGenerated,
    HashCalculated,
    AiChat,
    MemeCreated,
    JokeGenerated,
    MatrixModeToggled,
    HackerScreen,
    VirusScan,
    SystemUpdate,
    KonamiCode,
    TerminalModeToggled,
    MemoryGameCompleted { moves: u32 },
}

impl Activity {
    pub fn xp(&self) -> u64 {
        match self {
            Self::Login => XpRewards::LOGIN,
            Self::Signup => XpRewards::SIGNUP,
            Self::PasswordGenerated => XpRewards::PASSWORD_GENERATED,
            Self::HashCalculated => XpRewards::HASH_CALCULATED,
            Self::AiChat => XpRewards::AI_CHAT,
            Self::MemeCreated => XpRewards::MEME_CREATED,
            Self::JokeGenerated => XpRewards::JOKE_GENERATED,
            Self::MatrixModeToggled => XpRewards::MATRIX_MODE,
            Self::HackerScreen => XpRewards::HACKER_SCREEN,
            Self::VirusScan => XpRewards::VIRUS_SCAN,
            Self::SystemUpdate => XpRewards::SYSTEM_UPDATE,
            Self::KonamiCode => XpRewards::KONAMI_CODE,
            Self::TerminalModeToggled => XpRewards::TERMINAL_MODE,
            Self::MemoryGameCompleted { moves } => XpRewards::memory_game(*moves),
        }
    }

    /// Activity log description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Login => "System authentication successful",
            Self::Signup => "New user registration",
            Self::PasswordGenerated => "Generated secure password",
            Self::HashCalculated => "Used hash calculator",
            Self::AiChat => "Chatted with AI assistant",
            Self::MemeCreated => "Created a cyberpunk meme",
            Self::JokeGenerated => "Generated a cyberpunk joke",
            Self::MatrixModeToggled => "Toggled Matrix mode",
            Self::HackerScreen => "Activated fake hacker screen",
            Self::VirusScan => "Ran fake virus scan",
            Self::SystemUpdate => "Ran fake system update",
            Self::KonamiCode => "Discovered the legendary Konami Code",
            Self::TerminalModeToggled => "Toggled terminal mode",
            Self::MemoryGameCompleted { .. } => "Completed cyber memory challenge",
        }
    }
}
