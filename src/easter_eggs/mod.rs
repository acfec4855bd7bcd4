//! Easter eggs: display modes, the Konami code and harmless pranks
//!
//! None of these persist. Each one grants XP through [`crate::app::App`],
//! which pairs the state change here with the reward.

pub mod konami;
pub mod pranks;

pub use konami::{KONAMI_SEQUENCE, Key, KonamiDetector};
pub use pranks::Prank;

/// Full-screen effects the visitor can switch on and off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayModes {
    matrix: bool,
    terminal: bool,
}

impl DisplayModes {
    pub fn matrix(&self) -> bool {
        self.matrix
    }

    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Flip matrix mode, returning the new state
    pub fn toggle_matrix(&mut self) -> bool {
        self.matrix = !self.matrix;
        self.matrix
    }

    /// Flip terminal mode, returning the new state
    pub fn toggle_terminal(&mut self) -> bool {
        self.terminal = !self.terminal;
        self.terminal
    }
}
