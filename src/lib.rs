//! Cyberfolio - progression behind a cyberpunk portfolio
//!
//! Visitors earn experience for what they do on the site: signing in, using
//! the toy security tools, finding easter eggs and finishing mini-games.
//! Experience drives a six-step level ladder, unlocks achievement badges and
//! is kept in a capped activity log, all persisted to a local key-value store.
//!
//! ## Layout
//!
//! - [`progress`]: the progression store (XP, levels, badges, activity log,
//!   game stats) and the reward table
//! - [`storage`]: key-value backends (SQLite, in-memory)
//! - [`identity`] and [`preferences`]: mock sign-in and theme/language
//! - [`games`] and [`schedule`]: the memory game and its cancelable timers
//! - [`tools`]: password meter and generator, checksum, canned chat, jokes
//!   and memes
//! - [`easter_eggs`]: display modes, the Konami code and pranks
//! - [`music`]: the playlist player
//! - [`app`]: the context that wires everything together

pub mod app;
pub mod config;
pub mod easter_eggs;
pub mod games;
pub mod identity;
pub mod music;
pub mod preferences;
pub mod progress;
pub mod schedule;
pub mod storage;
pub mod tools;
