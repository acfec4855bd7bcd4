//! Preference commands: theme, lang

use anyhow::{Result, bail};

use cyberfolio::app::App;
use cyberfolio::preferences::{Language, Theme};

/// Set the theme, or toggle it when no value is given
pub fn theme_command(app: &mut App, value: Option<String>) -> Result<()> {
    let theme = match value {
        Some(value) => {
            let Some(theme) = Theme::parse(&value) else {
                bail!("Unknown theme: {} (expected light or dark)", value);
            };
            app.set_theme(theme);
            theme
        }
        None => app.toggle_theme(),
    };
    println!("Theme: {}", theme);
    Ok(())
}

/// Set the language, or toggle it when no value is given
pub fn lang_command(app: &mut App, value: Option<String>) -> Result<()> {
    let language = match value {
        Some(value) => {
            let Some(language) = Language::parse(&value) else {
                bail!("Unknown language: {} (expected en or hi)", value);
            };
            app.set_language(language);
            language
        }
        None => app.toggle_language(),
    };
    println!("Language: {}", language);
    Ok(())
}
