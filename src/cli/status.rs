//! Read-only commands: status, log, achievements

use anyhow::Result;

use cyberfolio::app::App;
use cyberfolio::progress::{Achievement, LevelProgress};

const BAR_WIDTH: usize = 20;

fn progress_bar(progress: &LevelProgress) -> String {
    let filled = ((progress.progress_to_next() * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Show the profile summary
pub fn status_command(app: &App) -> Result<()> {
    let snapshot = app.snapshot();

    match app.identity() {
        Some(identity) => println!(
            "Operator: {} <{}> [{}]",
            identity.name, identity.email, identity.access_level
        ),
        None => println!("Operator: (not signed in)"),
    }

    println!("Level:    {}", snapshot.level);
    match snapshot.level_progress.next_level_xp {
        Some(next) => println!(
            "XP:       {} / {} {}",
            snapshot.experience,
            next,
            progress_bar(&snapshot.level_progress)
        ),
        None => println!("XP:       {} (max level)", snapshot.experience),
    }
    println!(
        "Badges:   {} / {}",
        snapshot.badge_count,
        Achievement::total_count()
    );
    println!("Games:    {}", snapshot.total_games_played);
    println!(
        "Theme:    {}  Language: {}",
        app.preferences().theme(),
        app.preferences().language()
    );

    if let Some(latest) = snapshot.activity_log.first() {
        println!(
            "Latest:   {} ({})",
            latest.description,
            latest.timestamp.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}

/// Show the activity log, newest first
pub fn log_command(app: &App, limit: Option<usize>) -> Result<()> {
    let snapshot = app.snapshot();
    if snapshot.activity_log.is_empty() {
        println!("No activity recorded.");
        return Ok(());
    }

    let limit = limit.unwrap_or(snapshot.activity_log.len());
    for entry in snapshot.activity_log.iter().take(limit) {
        println!(
            "  {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.description
        );
    }

    Ok(())
}

/// List every achievement and whether it is earned
pub fn achievements_command(app: &App) -> Result<()> {
    let statuses = app.achievements();
    let earned = statuses.iter().filter(|s| s.earned).count();
    println!("Achievements ({}/{}):\n", earned, statuses.len());

    for status in statuses {
        let mark = if status.earned { "x" } else { " " };
        println!(
            "  [{}] {} {} - {}",
            mark, status.achievement.icon, status.achievement.name, status.achievement.description
        );
    }

    Ok(())
}
