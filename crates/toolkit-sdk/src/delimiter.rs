// Heredoc delimiter generation for file commands.
// A fresh boundary token is drawn per invocation so a multi-line value can
// never be confused with its own boundary.

use uuid::Uuid;

/// Fixed prefix for generated heredoc delimiters.
pub const DELIMITER_PREFIX: &str = "ghadelimiter_";

/// Supplies a fresh boundary token per file-command invocation.
pub trait DelimiterSource: Send + Sync {
    fn next_delimiter(&self) -> String;
}

/// Production source: the fixed prefix plus a random UUID suffix, making a
/// collision with user content vanishingly unlikely.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidDelimiterSource;

impl DelimiterSource for UuidDelimiterSource {
    fn next_delimiter(&self) -> String {
        format!("{DELIMITER_PREFIX}{}", Uuid::new_v4())
    }
}

/// A source returning a fixed token. Useful for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedDelimiterSource {
    token: String,
}

impl FixedDelimiterSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl DelimiterSource for FixedDelimiterSource {
    fn next_delimiter(&self) -> String {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_source_uses_prefix() {
        let source = UuidDelimiterSource;
        let delimiter = source.next_delimiter();
        assert!(delimiter.starts_with(DELIMITER_PREFIX));
        assert!(delimiter.len() > DELIMITER_PREFIX.len());
    }

    #[test]
    fn uuid_source_is_unique_per_call() {
        let source = UuidDelimiterSource;
        assert_ne!(source.next_delimiter(), source.next_delimiter());
    }

    #[test]
    fn fixed_source_is_stable() {
        let source = FixedDelimiterSource::new("EOF");
        assert_eq!(source.next_delimiter(), "EOF");
        assert_eq!(source.next_delimiter(), "EOF");
    }
}
