//! Rolling checksum behind the "hash calculator"
//!
//! This is a 31-multiplier string hash dressed up with digest-sized output.
//! It is not a cryptographic hash and the algorithm labels only pick the width.

use std::fmt;

use super::ToolError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Some(Self::Md5),
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Output width in hex characters
    pub fn width(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |h, unit| {
            (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit))
        })
}

/// Checksum `input`, padded with `0` and cut to the algorithm's width
pub fn checksum(input: &str, algorithm: HashAlgorithm) -> Result<String, ToolError> {
    if input.is_empty() {
        return Err(ToolError::EmptyInput);
    }

    let width = algorithm.width();
    let mut digest = format!("{:x}", rolling_hash(input).unsigned_abs());
    if digest.len() < width {
        digest.push_str(&"0".repeat(width - digest.len()));
    }
    digest.truncate(width);
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let abc = checksum("abc", HashAlgorithm::Md5).unwrap();
        assert_eq!(abc, format!("17862{}", "0".repeat(27)));

        let a = checksum("a", HashAlgorithm::Sha1).unwrap();
        assert_eq!(a, format!("61{}", "0".repeat(38)));
    }

    #[test]
    fn test_widths() {
        for algorithm in [
            HashAlgorithm::Md5,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
        ] {
            let digest = checksum("cyberfolio", algorithm).unwrap();
            assert_eq!(digest.len(), algorithm.width());
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_wrapping_and_abs() {
        // Long input overflows i32 many times over
        let digest = checksum(&"z".repeat(500), HashAlgorithm::Sha256).unwrap();
        assert_eq!(digest.len(), 64);

        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("abc"), 96354);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(
            checksum("", HashAlgorithm::Md5).unwrap_err(),
            ToolError::EmptyInput
        );
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(HashAlgorithm::parse("SHA512"), Some(HashAlgorithm::Sha512));
        assert_eq!(HashAlgorithm::parse("crc32"), None);
    }
}
