//! Tokenization anonymization strategy

use super::Anonymizer;
use crate::config::SecretString;
use crate::domain::{CloakError, Result};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Longest token the strategy can produce (hex-encoded SHA-256)
pub const MAX_TOKEN_LEN: usize = 64;

/// Tokenization strategy - replaces a value with a keyed hash
///
/// The token is the lowercase hex HMAC-SHA256 of the value under the key,
/// cut to `max_token_len` characters. The same value and key always give the
/// same token, so tokenized columns can still be joined across files.
pub struct TokenStrategy {
    key: SecretString,
    max_token_len: Option<usize>,
}

impl TokenStrategy {
    /// Create a new tokenization strategy
    pub fn new(key: SecretString, max_token_len: Option<usize>) -> Self {
        Self { key, max_token_len }
    }

    fn token(&self, value: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .map_err(|e| CloakError::Transform(format!("Invalid tokenizer key: {e}")))?;
        mac.update(value.as_bytes());
        let mut token = format!("{:x}", mac.finalize().into_bytes());
        if let Some(len) = self.max_token_len {
            token.truncate(len);
        }
        Ok(token)
    }
}

impl Anonymizer for TokenStrategy {
    fn anonymize(&self, value: &str) -> Result<String> {
        if value.is_empty() {
            return Ok(String::new());
        }
        self.token(value)
    }

    fn name(&self) -> &'static str {
        "tokenizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn strategy(key: &str, len: Option<usize>) -> TokenStrategy {
        TokenStrategy::new(secret_string(key.to_string()), len)
    }

    #[test]
    fn test_tokenization_is_deterministic() {
        let first = strategy("k", Some(10)).anonymize("John").unwrap();
        let second = strategy("k", Some(10)).anonymize("John").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }

    #[test]
    fn test_tokenization_depends_on_key_and_value() {
        let s = strategy("k", None);
        assert_ne!(s.anonymize("John").unwrap(), s.anonymize("Jane").unwrap());
        assert_ne!(
            s.anonymize("John").unwrap(),
            strategy("other", None).anonymize("John").unwrap()
        );
    }

    #[test]
    fn test_known_hmac_vector() {
        // RFC 4231 test case 2
        let s = strategy("Jefe", None);
        assert_eq!(
            s.anonymize("what do ya want for nothing?").unwrap(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_untruncated_and_oversized_lengths() {
        assert_eq!(strategy("k", None).anonymize("x").unwrap().len(), MAX_TOKEN_LEN);
        assert_eq!(strategy("k", Some(500)).anonymize("x").unwrap().len(), MAX_TOKEN_LEN);
    }

    #[test]
    fn test_empty_value_stays_empty() {
        assert_eq!(strategy("k", Some(8)).anonymize("").unwrap(), "");
    }

    #[test]
    fn test_token_is_lowercase_hex() {
        let token = strategy("k", None).anonymize("2020-01-01").unwrap();
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
