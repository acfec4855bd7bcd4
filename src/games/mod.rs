//! Mini-games. Only the memory matching game is implemented.

pub mod memory;
pub mod view;

pub use memory::{Card, CardState, FlipOutcome, MEMORY_GAME_ID, MemoryGame, SYMBOLS, format_clock};
pub use view::BoardView;
