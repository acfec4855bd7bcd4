//! CLI command implementations

pub mod auth;
pub mod fun;
pub mod init;
pub mod memory;
pub mod music;
pub mod prefs;
pub mod progress;
pub mod status;
pub mod tools;

use cyberfolio::progress::ProgressEvent;

/// Print what an action changed
pub fn print_events(events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::XpAwarded {
                amount,
                description,
                total,
            } => println!("+{} XP  {} (total {})", amount, description, total),
            ProgressEvent::LevelUp(level_up) => {
                println!("LEVEL UP! {} -> {}", level_up.old_level, level_up.new_level)
            }
            ProgressEvent::AchievementUnlocked(unlocked) => println!(
                "Achievement unlocked: {} {} - {}",
                unlocked.achievement.icon, unlocked.achievement.name, unlocked.achievement.description
            ),
            ProgressEvent::HighScore { game_id, score } => {
                println!("New high score for {}: {}", game_id, score)
            }
            ProgressEvent::GamePlayed { .. } | ProgressEvent::Reset => {}
        }
    }
}
