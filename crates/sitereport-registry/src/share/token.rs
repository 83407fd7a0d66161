//! Share-token generation.

use rand::Rng;

use sitereport_core::config::share::ShareConfig;

/// Generates unguessable tokens for public share links.
#[derive(Debug, Clone)]
pub struct ShareTokenGenerator {
    /// Number of random bytes per token.
    token_bytes: usize,
}

impl ShareTokenGenerator {
    /// Creates a new token generator.
    pub fn new(config: &ShareConfig) -> Self {
        Self {
            token_bytes: config.token_bytes,
        }
    }

    /// Generates a cryptographically secure random token.
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..self.token_bytes).map(|_| rng.gen()).collect();
        hex_encode(&bytes)
    }
}

impl Default for ShareTokenGenerator {
    fn default() -> Self {
        Self::new(&ShareConfig::default())
    }
}

/// Encode bytes to a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_long_and_unique() {
        let generator = ShareTokenGenerator::default();
        let first = generator.generate();
        let second = generator.generate();
        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
