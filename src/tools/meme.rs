//! Two-line meme composer

use std::fmt;

use super::ToolError;

/// Caption pair, stored uppercased the way it is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meme {
    pub top: String,
    pub bottom: String,
}

impl fmt::Display for Meme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.top)?;
        write!(f, "{}", self.bottom)
    }
}

/// Compose a meme. One of the two lines may be blank, not both.
pub fn compose_meme(top: &str, bottom: &str) -> Result<Meme, ToolError> {
    let (top, bottom) = (top.trim(), bottom.trim());
    if top.is_empty() && bottom.is_empty() {
        return Err(ToolError::EmptyInput);
    }
    Ok(Meme {
        top: top.to_uppercase(),
        bottom: bottom.to_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_is_enough() {
        let meme = compose_meme("", "  it works on my machine ").unwrap();
        assert_eq!(meme.top, "");
        assert_eq!(meme.bottom, "IT WORKS ON MY MACHINE");
        assert_eq!(meme.to_string(), "\nIT WORKS ON MY MACHINE");
    }

    #[test]
    fn test_both_blank_rejected() {
        assert_eq!(compose_meme(" ", "\t").unwrap_err(), ToolError::EmptyInput);
    }
}
