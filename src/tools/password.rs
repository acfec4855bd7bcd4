//! Password strength meter and generator

use rand::Rng;

pub const GENERATED_PASSWORD_LENGTH: usize = 16;

const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthRating {
    Empty,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::Empty,
            1 | 2 => Self::Weak,
            3 => Self::Fair,
            4 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "Enter password",
            Self::Weak => "WEAK - Vulnerable to attacks",
            Self::Fair => "FAIR - Needs improvement",
            Self::Good => "GOOD - Acceptable security",
            Self::Strong => "STRONG - Fortress-level security",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthReport {
    /// 0-5, one point per satisfied rule
    pub score: u8,
    pub rating: StrengthRating,
}

/// Score a password against the five rules: at least 8 characters, a
/// lowercase letter, an uppercase letter, a digit, and a symbol.
pub fn check_strength(password: &str) -> StrengthReport {
    // Length is measured in UTF-16 code units, like the browser input it mirrors
    let rules = [
        password.encode_utf16().count() >= 8,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = rules.iter().filter(|passed| **passed).count() as u8;

    StrengthReport {
        score,
        rating: StrengthRating::from_score(score),
    }
}

pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_PASSWORD_LENGTH)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}
