//! Secret handling for the tokenization key
//!
//! The key is wrapped in [`secrecy::Secret`] so it is zeroed on drop and
//! redacted from `Debug` output. Reading it requires `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use cloak::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("join-key".to_string());
//! assert_eq!(key.expose_secret().as_str(), "join-key");
//! assert!(!format!("{key:?}").contains("join-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String payload that can live inside a [`Secret`]
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
// Policy documents carry the key to the engine, so it must serialize.
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl SecretValue {
    /// Borrows the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Borrows the key as raw bytes (HMAC input)
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// True for an empty or all-whitespace key
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string used for the tokenization key
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-key".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-key"));
    }

    #[test]
    fn test_secret_bytes() {
        let secret = secret_string("abc".to_string());
        assert_eq!(secret.expose_secret().as_bytes(), b"abc");
    }

    #[test]
    fn test_is_blank() {
        assert!(secret_string("   ".to_string()).expose_secret().is_blank());
        assert!(!secret_string("k".to_string()).expose_secret().is_blank());
    }

    #[test]
    fn test_secret_yaml_roundtrip() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            key: SecretString,
        }

        let yaml = serde_yaml::to_string(&Holder {
            key: secret_string("s3cret".to_string()),
        })
        .unwrap();
        assert!(yaml.contains("s3cret"));

        let parsed: Holder = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.key.expose_secret().as_str(), "s3cret");
    }
}
