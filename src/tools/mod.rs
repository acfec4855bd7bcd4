//! Toy tools: password meter and generator, checksum, chat, jokes and memes

pub mod chat;
pub mod checksum;
pub mod jokes;
pub mod meme;
pub mod password;

pub use chat::respond;
pub use checksum::{HashAlgorithm, checksum};
pub use jokes::tell_joke;
pub use meme::{Meme, compose_meme};
pub use password::{StrengthRating, StrengthReport, check_strength, generate_password};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("Input is empty")]
    EmptyInput,
}
