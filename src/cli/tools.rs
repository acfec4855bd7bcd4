//! Toy tool commands: hash, password, chat

use anyhow::{Result, bail};

use cyberfolio::app::App;
use cyberfolio::tools::{HashAlgorithm, check_strength};

use super::print_events;

pub fn hash_command(app: &mut App, text: &str, algorithm: &str) -> Result<()> {
    let Some(algorithm) = HashAlgorithm::parse(algorithm) else {
        bail!("Unknown algorithm: {} (expected md5, sha1, sha256 or sha512)", algorithm);
    };

    let rewarded = app.calculate_hash(text, algorithm)?;
    println!("{}: {}", algorithm.as_str().to_uppercase(), rewarded.value);
    print_events(&rewarded.events);
    Ok(())
}

/// Score a password. Grants no XP.
pub fn password_check_command(password: &str) -> Result<()> {
    let report = check_strength(password);
    println!("Strength: {}/5 {}", report.score, report.rating.label());
    Ok(())
}

pub fn password_generate_command(app: &mut App) -> Result<()> {
    let rewarded = app.generate_password()?;
    println!("{}", rewarded.value);
    print_events(&rewarded.events);
    Ok(())
}

pub fn chat_command(app: &mut App, message: &str) -> Result<()> {
    let rewarded = app.chat(message)?;
    println!("AI: {}", rewarded.value);
    print_events(&rewarded.events);
    Ok(())
}
