//! Memory matching game state machine

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

use crate::progress::XpRewards;

pub const MEMORY_GAME_ID: &str = "cyber-memory";

pub const SYMBOLS: [&str; 8] = ["🔒", "🔑", "🛡️", "🔐", "🗝️", "🔓", "💾", "⚡"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    FaceUp,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub symbol: &'static str,
    pub state: CardState,
}

impl Card {
    /// Symbol when visible, `None` when face down
    pub fn face(&self) -> Option<&'static str> {
        match self.state {
            CardState::Hidden => None,
            CardState::FaceUp | CardState::Matched => Some(self.symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Flip not allowed; nothing changed
    Ignored,
    /// First card of a pair turned over
    Revealed { index: usize },
    Matched { first: usize, second: usize },
    /// Both cards stay face up until [`MemoryGame::conceal`]
    Mismatched { first: usize, second: usize },
    /// Final pair matched
    Completed {
        moves: u32,
        elapsed: Duration,
        xp: u64,
    },
}

#[derive(Debug, Clone)]
pub struct MemoryGame {
    cards: Vec<Card>,
    face_up: Vec<usize>,
    moves: u32,
    matched_pairs: usize,
    started: Instant,
    finished: Option<Duration>,
}

impl MemoryGame {
    /// Fresh shuffled deck with every symbol twice
    pub fn new() -> Self {
        let mut deck: Vec<&'static str> = SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        deck.shuffle(&mut rand::thread_rng());
        Self::with_deck(deck)
    }

    /// Game over a fixed deck, in order
    pub fn with_deck(deck: Vec<&'static str>) -> Self {
        Self {
            cards: deck
                .into_iter()
                .map(|symbol| Card {
                    symbol,
                    state: CardState::Hidden,
                })
                .collect(),
            face_up: Vec::with_capacity(2),
            moves: 0,
            matched_pairs: 0,
            started: Instant::now(),
            finished: None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn is_complete(&self) -> bool {
        self.finished.is_some()
    }

    /// Two unmatched cards are face up and waiting for [`conceal`](Self::conceal)
    pub fn awaiting_conceal(&self) -> bool {
        self.face_up.len() >= 2
    }

    /// Time since start, frozen once the game is complete
    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(|| self.started.elapsed())
    }

    pub fn clock(&self) -> String {
        format_clock(self.elapsed())
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.is_complete() || self.awaiting_conceal() {
            return FlipOutcome::Ignored;
        }
        match self.cards.get(index) {
            Some(card) if card.state == CardState::Hidden => {}
            _ => return FlipOutcome::Ignored,
        }

        self.cards[index].state = CardState::FaceUp;
        self.face_up.push(index);

        let [first, second] = match self.face_up.as_slice() {
            [first, second] => [*first, *second],
            _ => return FlipOutcome::Revealed { index },
        };

        self.moves = self.moves.saturating_add(1);
        if self.cards[first].symbol != self.cards[second].symbol {
            return FlipOutcome::Mismatched { first, second };
        }

        self.cards[first].state = CardState::Matched;
        self.cards[second].state = CardState::Matched;
        self.face_up.clear();
        self.matched_pairs += 1;

        if self.matched_pairs < self.total_pairs() {
            return FlipOutcome::Matched { first, second };
        }

        let elapsed = self.started.elapsed();
        self.finished = Some(elapsed);
        tracing::info!(
            "MISSION COMPLETE! Time: {}s, Moves: {}",
            elapsed.as_secs(),
            self.moves
        );
        FlipOutcome::Completed {
            moves: self.moves,
            elapsed,
            xp: XpRewards::memory_game(self.moves),
        }
    }

    /// Turn unmatched face-up cards back over. Returns true if any were.
    pub fn conceal(&mut self) -> bool {
        let mut concealed = false;
        for index in self.face_up.drain(..) {
            if let Some(card) = self.cards.get_mut(index) {
                if card.state == CardState::FaceUp {
                    card.state = CardState::Hidden;
                    concealed = true;
                }
            }
        }
        concealed
    }
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new()
    }
}

/// `MM:SS`
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Deck where pairs sit next to each other: 0-1, 2-3, ...
    pub(crate) fn paired_deck() -> Vec<&'static str> {
        SYMBOLS.iter().flat_map(|s| [*s, *s]).collect()
    }

    #[test]
    fn test_new_deck_has_every_symbol_twice() {
        let game = MemoryGame::new();
        assert_eq!(game.cards().len(), 16);
        for symbol in SYMBOLS {
            let count = game.cards().iter().filter(|c| c.symbol == symbol).count();
            assert_eq!(count, 2, "symbol {}", symbol);
        }
        assert!(game.cards().iter().all(|c| c.face().is_none()));
    }

    #[test]
    fn test_match_and_mismatch() {
        let mut game = MemoryGame::with_deck(paired_deck());

        assert_eq!(game.flip(0), FlipOutcome::Revealed { index: 0 });
        assert_eq!(game.flip(2), FlipOutcome::Mismatched { first: 0, second: 2 });
        assert_eq!(game.moves(), 1);
        assert!(game.awaiting_conceal());

        // Third card is blocked until the pair is concealed
        assert_eq!(game.flip(4), FlipOutcome::Ignored);
        assert!(game.conceal());
        assert!(!game.conceal());
        assert!(game.cards().iter().all(|c| c.state == CardState::Hidden));

        game.flip(0);
        assert_eq!(game.flip(1), FlipOutcome::Matched { first: 0, second: 1 });
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn test_ignored_flips() {
        let mut game = MemoryGame::with_deck(paired_deck());
        assert_eq!(game.flip(99), FlipOutcome::Ignored);

        game.flip(3);
        assert_eq!(game.flip(3), FlipOutcome::Ignored);
        game.flip(2);
        assert_eq!(game.cards()[2].state, CardState::Matched);
        assert_eq!(game.flip(2), FlipOutcome::Ignored);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_completion_reported_once() {
        let mut game = MemoryGame::with_deck(paired_deck());

        // Two wasted moves first
        game.flip(0);
        game.flip(2);
        game.conceal();
        game.flip(0);
        game.flip(4);
        game.conceal();

        let mut completed = Vec::new();
        for pair in 0..8 {
            game.flip(pair * 2);
            if let FlipOutcome::Completed { moves, xp, .. } = game.flip(pair * 2 + 1) {
                completed.push((moves, xp));
            }
        }

        assert_eq!(completed, vec![(10, 80)]);
        assert!(game.is_complete());
        assert_eq!(game.flip(0), FlipOutcome::Ignored);
        assert_eq!(game.elapsed(), game.elapsed());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_secs(59)), "00:59");
        assert_eq!(format_clock(Duration::from_millis(61_900)), "01:01");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }
}
