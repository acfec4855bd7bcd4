//! Playlist player behind the music section
//!
//! There is no audio. The player tracks which song is current and the
//! transport settings, which is all the page ever shows.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    /// Display string as listed, not validated
    pub duration: &'static str,
}

const fn track(title: &'static str, artist: &'static str, duration: &'static str) -> Track {
    Track {
        title,
        artist,
        duration,
    }
}

const CYBERPUNK: [Track; 4] = [
    track("Neon Dreams", "CyberSynth", "3:45"),
    track("Digital Uprising", "Matrix Sound", "4:12"),
    track("Quantum Pulse", "Neural Network", "3:58"),
    track("Electric Shadows", "Cyber Phantom", "4:33"),
];

const CODING: [Track; 4] = [
    track("Algorithm Flow", "Code Master", "5:21"),
    track("Binary Beats", "Logic Loop", "4:45"),
    track("Recursive Dreams", "Function Call", "3:67"),
    track("Stack Overflow", "Debug Mode", "4:18"),
];

const ANIME: [Track; 4] = [
    track("Opening Theme", "Solo Leveling OST", "1:30"),
    track("Battle Music", "Demon Slayer OST", "2:45"),
    track("Emotional Scene", "Angel Next Door", "3:12"),
    track("Credits Roll", "Alya Russian Feelings", "1:45"),
];

const GUITAR: [Track; 4] = [
    track("Acoustic Dreams", "Yamaha Sessions", "4:20"),
    track("Strings of Emotion", "Fender Vibes", "3:55"),
    track("Melancholic Guitar", "Cort Acoustics", "5:10"),
    track("Solo Performance", "Guitar Hero", "3:30"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaylistKind {
    #[default]
    Cyberpunk,
    Coding,
    Anime,
    Guitar,
}

impl PlaylistKind {
    pub fn all() -> &'static [PlaylistKind] {
        &[Self::Cyberpunk, Self::Coding, Self::Anime, Self::Guitar]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cyberpunk => "cyberpunk",
            Self::Coding => "coding",
            Self::Anime => "anime",
            Self::Guitar => "guitar",
        }
    }

    /// Unknown names fall back to the cyberpunk playlist
    pub fn parse(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }

    pub fn tracks(&self) -> &'static [Track] {
        match self {
            Self::Cyberpunk => &CYBERPUNK,
            Self::Coding => &CODING,
            Self::Anime => &ANIME,
            Self::Guitar => &GUITAR,
        }
    }
}

pub const DEFAULT_VOLUME: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct MusicPlayer {
    playlist: PlaylistKind,
    current: usize,
    playing: bool,
    volume: f32,
    shuffle: bool,
    repeat: bool,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self {
            playlist: PlaylistKind::default(),
            current: 0,
            playing: false,
            volume: DEFAULT_VOLUME,
            shuffle: false,
            repeat: false,
        }
    }
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playlist(&self) -> PlaylistKind {
        self.playlist
    }

    pub fn tracks(&self) -> &'static [Track] {
        self.playlist.tracks()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn now_playing(&self) -> Track {
        self.tracks()[self.current]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn volume_percent(&self) -> u8 {
        (self.volume * 100.0).round() as u8
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Load another playlist from its first track
    pub fn switch_playlist(&mut self, playlist: PlaylistKind) {
        self.playlist = playlist;
        self.current = 0;
        tracing::debug!("Playlist: {}", playlist.as_str());
    }

    /// Jump to a track. Out-of-range indices are ignored.
    pub fn select_track(&mut self, index: usize) -> bool {
        if index >= self.tracks().len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Advance, wrapping at the end. With shuffle on, jump to a different
    /// random track instead.
    pub fn next_track(&mut self) -> Track {
        let len = self.tracks().len();
        self.current = if self.shuffle && len > 1 {
            let offset = rand::thread_rng().gen_range(1..len);
            (self.current + offset) % len
        } else {
            (self.current + 1) % len
        };
        self.now_playing()
    }

    pub fn previous_track(&mut self) -> Track {
        let len = self.tracks().len();
        self.current = (self.current + len - 1) % len;
        self.now_playing()
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    /// Clamped to 0.0..=1.0; NaN is ignored
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// The current track ran out: replay it on repeat, otherwise move on
    pub fn track_finished(&mut self) -> Track {
        if self.repeat {
            self.now_playing()
        } else {
            self.next_track()
        }
    }
}
