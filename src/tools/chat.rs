//! Canned "AI assistant" replies

use rand::seq::SliceRandom;

use super::ToolError;

pub const RESPONSES: [&str; 7] = [
    "That's an excellent question about cybersecurity! Let me analyze that for you.",
    "Based on current threat intelligence, I'd recommend implementing multi-factor authentication.",
    "Interesting! In the context of quantum computing, that approach could be vulnerable.",
    "From a defensive perspective, you should consider using zero-trust architecture.",
    "That's a common attack vector. I suggest implementing proper input validation.",
    "Great question! Network segmentation would be your best defense here.",
    "According to the latest OWASP guidelines, that's classified as a high-risk vulnerability.",
];

/// Reply to a chat message. The message content does not affect the reply.
pub fn respond(message: &str) -> Result<&'static str, ToolError> {
    if message.trim().is_empty() {
        return Err(ToolError::EmptyInput);
    }
    Ok(RESPONSES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(RESPONSES[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_is_canned() {
        for _ in 0..20 {
            let reply = respond("how do I stop phishing?").unwrap();
            assert!(RESPONSES.contains(&reply));
        }
    }

    #[test]
    fn test_blank_message_rejected() {
        assert_eq!(respond("   ").unwrap_err(), ToolError::EmptyInput);
    }
}
