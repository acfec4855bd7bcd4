//! Fake hacker screen, virus scan and system update

use crate::progress::Activity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prank {
    HackerScreen,
    VirusScan,
    SystemUpdate,
}

const HACKER_SCREEN: &[&str] = &[
    "Initializing neural interface...",
    "Bypassing firewall protocols...",
    "Access granted to mainframe...",
    "Downloading sensitive data...",
    "Uploading virus payload...",
    "Erasing digital footprints...",
    "Mission accomplished.",
    "Connection terminated.",
];

const VIRUS_SCAN: &[&str] = &[
    "🚨 VIRUS SCAN INITIATED - Scanning 50,847 files...",
    "⚠️ THREAT DETECTED: Harmless_Prank.exe",
    "✅ QUARANTINE SUCCESSFUL - System is secure",
];

const SYSTEM_UPDATE: &[&str] = &[
    "Preparing...",
    "Downloading...",
    "Installing...",
    "Configuring...",
    "Almost done...",
    "Complete!",
    "Update complete! (Just kidding 😄)",
];

impl Prank {
    pub fn all() -> &'static [Prank] {
        &[Self::HackerScreen, Self::VirusScan, Self::SystemUpdate]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HackerScreen => "hacker",
            Self::VirusScan => "virus-scan",
            Self::SystemUpdate => "system-update",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.as_str() == s)
    }

    /// Lines shown one after another while the prank plays
    pub fn script(&self) -> &'static [&'static str] {
        match self {
            Self::HackerScreen => HACKER_SCREEN,
            Self::VirusScan => VIRUS_SCAN,
            Self::SystemUpdate => SYSTEM_UPDATE,
        }
    }

    pub fn activity(&self) -> Activity {
        match self {
            Self::HackerScreen => Activity::HackerScreen,
            Self::VirusScan => Activity::VirusScan,
            Self::SystemUpdate => Activity::SystemUpdate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for prank in Prank::all() {
            assert_eq!(Prank::parse(prank.as_str()), Some(*prank));
            assert!(!prank.script().is_empty());
        }
        assert_eq!(Prank::parse("konami"), None);
    }

    #[test]
    fn test_scripts_end_reassuringly() {
        assert_eq!(Prank::HackerScreen.script().last(), Some(&"Connection terminated."));
        assert!(Prank::VirusScan.script()[2].contains("secure"));
        assert_eq!(Prank::SystemUpdate.activity().xp(), 5);
    }
}
