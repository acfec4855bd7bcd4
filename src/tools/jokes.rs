//! Cyberpunk joke generator

use rand::seq::SliceRandom;

pub const JOKES: [&str; 10] = [
    "Why don't hackers ever get stressed? Because they know how to handle exceptions!",
    "What's a hacker's favorite season? Phishing season!",
    "Why do cybersecurity experts make bad comedians? Their jokes are too encrypted!",
    "What do you call a security expert who works from home? A remote access specialist!",
    "Why did the firewall break up with the antivirus? There were too many false positives!",
    "What's the best way to communicate with malware? Don't - it's not a trusted source!",
    "Why do passwords never get invited to parties? They're always getting cracked under pressure!",
    "What did the ethical hacker say to the black hat? 'I'm going to report you to your supervisor!'",
    "Why don't quantum computers get viruses? They exist in a superposition of infected and clean!",
    "What's a cyberpunk's favorite type of music? Synthwave - it's always in the mainframe!",
];

/// A random joke. Repeats are allowed.
pub fn tell_joke() -> &'static str {
    JOKES.choose(&mut rand::thread_rng()).copied().unwrap_or(JOKES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joke_comes_from_list() {
        for _ in 0..20 {
            assert!(JOKES.contains(&tell_joke()));
        }
    }
}
