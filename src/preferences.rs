//! Theme and language preferences
//!
//! Each preference is stored as a bare string under its own key.

use std::fmt;

use crate::storage::{KeyValueStore, SharedStore, keys, load_raw};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::En => Self::Hi,
            Self::Hi => Self::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Preferences {
    theme: Theme,
    language: Language,
    store: SharedStore,
}

impl Preferences {
    /// Load stored preferences; unknown values fall back to the defaults
    pub fn restore(store: SharedStore) -> Self {
        let theme = load_raw(store.as_ref(), keys::THEME)
            .and_then(|raw| {
                let parsed = Theme::parse(&raw);
                if parsed.is_none() {
                    tracing::warn!("Ignoring unknown theme '{}'", raw);
                }
                parsed
            })
            .unwrap_or_default();
        let language = load_raw(store.as_ref(), keys::LANGUAGE)
            .and_then(|raw| {
                let parsed = Language::parse(&raw);
                if parsed.is_none() {
                    tracing::warn!("Ignoring unknown language '{}'", raw);
                }
                parsed
            })
            .unwrap_or_default();

        Self {
            theme,
            language,
            store,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.write(keys::THEME, theme.as_str());
        tracing::info!("Theme: {} MODE", theme.as_str().to_uppercase());
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.write(keys::LANGUAGE, language.as_str());
        tracing::info!("Language: {}", language.as_str().to_uppercase());
    }

    pub fn toggle_language(&mut self) -> Language {
        self.set_language(self.language.toggled());
        self.language
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!("Failed to persist '{}': {}", key, e);
        }
    }
}
