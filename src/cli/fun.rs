//! Fun-zone commands: joke, meme, display modes, Konami code, pranks

use std::time::Duration;

use anyhow::{Result, bail};

use cyberfolio::app::App;
use cyberfolio::easter_eggs::Prank;

use super::print_events;

const PRANK_LINE_DELAY: Duration = Duration::from_millis(400);

pub fn joke_command(app: &mut App) -> Result<()> {
    let rewarded = app.tell_joke()?;
    println!("{}", rewarded.value);
    print_events(&rewarded.events);
    Ok(())
}

pub fn meme_command(app: &mut App, top: &str, bottom: &str) -> Result<()> {
    let rewarded = app.create_meme(top, bottom)?;
    println!("{}", rewarded.value);
    print_events(&rewarded.events);
    Ok(())
}

pub fn matrix_command(app: &mut App) -> Result<()> {
    let rewarded = app.toggle_matrix_mode()?;
    if rewarded.value {
        println!("MATRIX MODE ACTIVATED - Welcome to the real world");
    } else {
        println!("MATRIX MODE DEACTIVATED - Back to simulation");
    }
    print_events(&rewarded.events);
    Ok(())
}

pub fn terminal_command(app: &mut App) -> Result<()> {
    let rewarded = app.toggle_terminal_mode()?;
    if rewarded.value {
        println!("TERMINAL MODE ACTIVATED - Entering the matrix...");
    } else {
        println!("TERMINAL MODE DEACTIVATED - Returning to GUI...");
    }
    print_events(&rewarded.events);
    Ok(())
}

/// Replay key presses (e.g. `up up down down left right left right b a`)
pub fn konami_command(app: &mut App, keys: &[String]) -> Result<()> {
    let mut found = false;
    for key in keys {
        let rewarded = app.press_key(key)?;
        if rewarded.value {
            found = true;
            println!("🎉 KONAMI CODE ACTIVATED! Secret cyber powers unlocked!");
            print_events(&rewarded.events);
        }
    }
    if !found {
        println!("Nothing happened.");
    }
    Ok(())
}

pub async fn prank_command(app: &mut App, name: &str) -> Result<()> {
    let Some(prank) = Prank::parse(name) else {
        let known: Vec<_> = Prank::all().iter().map(|p| p.as_str()).collect();
        bail!("Unknown prank: {}\nKnown pranks: {}", name, known.join(", "));
    };

    let rewarded = app.run_prank(prank)?;
    for line in rewarded.value {
        println!("{}", line);
        tokio::time::sleep(PRANK_LINE_DELAY).await;
    }
    print_events(&rewarded.events);
    Ok(())
}
