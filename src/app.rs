//! Application context
//!
//! [`App`] wires one storage backend to the progress store, the identity
//! session and the preferences, and is the only handle callers need. Every
//! XP-granting action goes through here so the reward table is applied in
//! one place.

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::config::{Config, GameSettings, StorageBackend};
use crate::easter_eggs::{DisplayModes, Key, KonamiDetector, Prank};
use crate::games::{BoardView, FlipOutcome, MEMORY_GAME_ID, MemoryGame};
use crate::identity::{Identity, Session, SignupForm};
use crate::music::MusicPlayer;
use crate::preferences::{Language, Preferences, Theme};
use crate::progress::{
    Activity, AchievementStatus, ProgressError, ProgressEvent, ProgressSnapshot, ProgressStore,
};
use crate::storage::{MemoryStore, SharedStore, SqliteStore};
use crate::tools::{self, HashAlgorithm, Meme};

/// Result of an action together with the progress events it caused
#[derive(Debug)]
pub struct Rewarded<T> {
    pub value: T,
    pub events: Vec<ProgressEvent>,
}

pub struct App {
    progress: ProgressStore,
    session: Session,
    preferences: Preferences,
    games: GameSettings,
    board: Option<BoardView>,
    modes: DisplayModes,
    konami: KonamiDetector,
    music: MusicPlayer,
}

impl App {
    /// Open the storage backend named in `config` and restore all state
    pub fn open(config: &Config) -> Result<Self> {
        let storage: SharedStore = match config.storage.backend {
            StorageBackend::Sqlite => {
                let store = match &config.storage.path {
                    Some(path) => SqliteStore::open(path),
                    None => SqliteStore::open_default(),
                }
                .context("Failed to open progress storage")?;
                Arc::new(store)
            }
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(Self::with_storage(storage, config.games.clone()))
    }

    /// Ephemeral context; nothing outlives the process
    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(MemoryStore::new()), GameSettings::default())
    }

    pub fn with_storage(storage: SharedStore, games: GameSettings) -> Self {
        let session = Session::restore(storage.clone());
        let mut progress = ProgressStore::restore(storage.clone());
        progress.set_identity_present(session.is_authenticated());
        let preferences = Preferences::restore(storage);

        Self {
            progress,
            session,
            preferences,
            games,
            board: None,
            modes: DisplayModes::default(),
            konami: KonamiDetector::new(),
            music: MusicPlayer::new(),
        }
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Direct access for subscribing and game bookkeeping
    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.current()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    pub fn achievements(&self) -> Vec<AchievementStatus> {
        self.progress.achievements()
    }

    /// Award an arbitrary amount with a free-form description
    pub fn award(&mut self, amount: u64, description: &str) -> Result<Vec<ProgressEvent>, ProgressError> {
        self.progress.award_experience(amount, description)
    }

    /// Award the fixed reward for an action. Callers pair it with the state
    /// change the reward is for.
    fn perform(&mut self, activity: Activity) -> Result<Vec<ProgressEvent>, ProgressError> {
        self.progress.award_activity(activity)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Rewarded<Identity>> {
        let identity = self.session.login(email, password)?.clone();
        self.progress.set_identity_present(true);
        let events = self.perform(Activity::Login)?;
        Ok(Rewarded {
            value: identity,
            events,
        })
    }

    pub fn signup(&mut self, form: &SignupForm) -> Result<Rewarded<Identity>> {
        let identity = self.session.signup(form)?.clone();
        self.progress.set_identity_present(true);
        let events = self.perform(Activity::Signup)?;
        Ok(Rewarded {
            value: identity,
            events,
        })
    }

    /// Sign out. Progress is kept.
    pub fn logout(&mut self) -> Option<Identity> {
        let previous = self.session.logout();
        self.progress.set_identity_present(false);
        previous
    }

    /// Open the memory game and count it as played, replacing any game in
    /// progress. Fails without a tokio runtime, in which case nothing is
    /// counted.
    pub fn start_memory_game(&mut self) -> Result<Vec<ProgressEvent>> {
        self.start_memory_game_with(MemoryGame::new())
    }

    pub fn start_memory_game_with(&mut self, game: MemoryGame) -> Result<Vec<ProgressEvent>> {
        if let Some(board) = self.board.as_mut() {
            board.reset_with(game);
        } else {
            let board = BoardView::start_with(self.games.clone(), game)
                .context("Failed to start memory game")?;
            self.board = Some(board);
        }
        Ok(self.progress.record_game_played(MEMORY_GAME_ID))
    }

    /// Deal a fresh board in the open game. A restart is not a new game
    /// played.
    pub fn new_memory_board(&mut self) -> Result<()> {
        self.new_memory_board_with(MemoryGame::new())
    }

    pub fn new_memory_board_with(&mut self, game: MemoryGame) -> Result<()> {
        let Some(board) = self.board.as_mut() else {
            bail!("No memory game in progress");
        };
        board.reset_with(game);
        Ok(())
    }

    pub fn board(&self) -> Option<&BoardView> {
        self.board.as_ref()
    }

    /// Flip a card on the current board. Completion awards XP and records
    /// the score as the game's high score.
    pub fn flip_card(&mut self, index: usize) -> Result<Rewarded<FlipOutcome>> {
        let Some(board) = self.board.as_mut() else {
            bail!("No memory game in progress");
        };

        let outcome = board.flip(index);
        let mut events = Vec::new();
        if let FlipOutcome::Completed { moves, xp, .. } = outcome {
            events = self.perform(Activity::MemoryGameCompleted { moves })?;
            self.progress.record_high_score(MEMORY_GAME_ID, xp);
        }

        Ok(Rewarded {
            value: outcome,
            events,
        })
    }

    /// Close the board, canceling its timers
    pub fn close_board(&mut self) {
        self.board = None;
    }

    pub fn calculate_hash(&mut self, text: &str, algorithm: HashAlgorithm) -> Result<Rewarded<String>> {
        let digest = tools::checksum(text, algorithm)?;
        tracing::info!("{} hash calculated", algorithm.as_str().to_uppercase());
        let events = self.perform(Activity::HashCalculated)?;
        Ok(Rewarded {
            value: digest,
            events,
        })
    }

    pub fn generate_password(&mut self) -> Result<Rewarded<String>> {
        let password = tools::generate_password();
        let events = self.perform(Activity::PasswordGenerated)?;
        Ok(Rewarded {
            value: password,
            events,
        })
    }

    pub fn chat(&mut self, message: &str) -> Result<Rewarded<&'static str>> {
        let reply = tools::respond(message)?;
        let events = self.perform(Activity::AiChat)?;
        Ok(Rewarded {
            value: reply,
            events,
        })
    }

    pub fn tell_joke(&mut self) -> Result<Rewarded<&'static str>> {
        let joke = tools::tell_joke();
        let events = self.perform(Activity::JokeGenerated)?;
        Ok(Rewarded {
            value: joke,
            events,
        })
    }

    /// Blank captions on both lines are rejected and earn nothing
    pub fn create_meme(&mut self, top: &str, bottom: &str) -> Result<Rewarded<Meme>> {
        let meme = tools::compose_meme(top, bottom)?;
        let events = self.perform(Activity::MemeCreated)?;
        Ok(Rewarded {
            value: meme,
            events,
        })
    }

    pub fn display_modes(&self) -> DisplayModes {
        self.modes
    }

    /// Switching either way earns the reward
    pub fn toggle_matrix_mode(&mut self) -> Result<Rewarded<bool>> {
        let on = self.modes.toggle_matrix();
        tracing::info!("Matrix mode {}", if on { "on" } else { "off" });
        let events = self.perform(Activity::MatrixModeToggled)?;
        Ok(Rewarded { value: on, events })
    }

    pub fn toggle_terminal_mode(&mut self) -> Result<Rewarded<bool>> {
        let on = self.modes.toggle_terminal();
        tracing::info!("Terminal mode {}", if on { "on" } else { "off" });
        let events = self.perform(Activity::TerminalModeToggled)?;
        Ok(Rewarded { value: on, events })
    }

    /// Feed one key press to the Konami detector. `value` is true when the
    /// press completes the sequence.
    pub fn press_key(&mut self, key: &str) -> Result<Rewarded<bool>> {
        if !self.konami.push(Key::parse(key)) {
            return Ok(Rewarded {
                value: false,
                events: Vec::new(),
            });
        }
        tracing::info!("Konami code entered");
        let events = self.perform(Activity::KonamiCode)?;
        Ok(Rewarded {
            value: true,
            events,
        })
    }

    /// Play a prank, returning the lines it shows
    pub fn run_prank(&mut self, prank: Prank) -> Result<Rewarded<&'static [&'static str]>> {
        let events = self.perform(prank.activity())?;
        Ok(Rewarded {
            value: prank.script(),
            events,
        })
    }

    pub fn music(&self) -> &MusicPlayer {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicPlayer {
        &mut self.music
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.preferences.set_theme(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.toggle_theme()
    }

    pub fn set_language(&mut self, language: Language) {
        self.preferences.set_language(language);
    }

    pub fn toggle_language(&mut self) -> Language {
        self.preferences.toggle_language()
    }

    /// Reset progress and game stats. Identity and preferences stay.
    pub fn reset_progress(&mut self) {
        self.close_board();
        self.progress.reset();
    }
}
