//! Progress commands: award, reset

use anyhow::{Result, bail};

use cyberfolio::app::App;

use super::print_events;

/// Grant an arbitrary amount of XP
pub fn award_command(app: &mut App, amount: u64, description: &str) -> Result<()> {
    let events = app.award(amount, description)?;
    print_events(&events);
    Ok(())
}

/// Reset progress, keeping identity and preferences
pub fn reset_command(app: &mut App, yes: bool) -> Result<()> {
    if !yes {
        bail!("This erases all experience, badges and game stats.\nUse --yes to confirm.");
    }
    app.reset_progress();
    println!("Progress reset.");
    Ok(())
}
