//! Konami code detection over a sliding window of key presses

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    B,
    A,
    Other,
}

impl Key {
    /// Accepts DOM key codes (`ArrowUp`, `KeyB`) and short names (`up`, `b`)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrowup" | "up" => Self::Up,
            "arrowdown" | "down" => Self::Down,
            "arrowleft" | "left" => Self::Left,
            "arrowright" | "right" => Self::Right,
            "keyb" | "b" => Self::B,
            "keya" | "a" => Self::A,
            _ => Self::Other,
        }
    }
}

pub const KONAMI_SEQUENCE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::B,
    Key::A,
];

/// Remembers the last ten keys. The window clears after a match, so the
/// full sequence has to be entered again to trigger twice.
#[derive(Debug, Default)]
pub struct KonamiDetector {
    window: VecDeque<Key>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true when it completes the sequence.
    pub fn push(&mut self, key: Key) -> bool {
        if self.window.len() == KONAMI_SEQUENCE.len() {
            self.window.pop_front();
        }
        self.window.push_back(key);

        let matched = self.window.iter().eq(KONAMI_SEQUENCE.iter());
        if matched {
            self.window.clear();
        }
        matched
    }
}
