//! Anonymization strategy module
//!
//! One strategy per policy action type.

pub mod tokenization;

use crate::core::policy::TransformAction;
use crate::domain::Result;
use tokenization::TokenStrategy;

/// Trait for anonymization strategy implementations
pub trait Anonymizer: Send + Sync {
    /// Anonymize a single cell value
    fn anonymize(&self, value: &str) -> Result<String>;

    /// Action type this strategy implements
    fn name(&self) -> &'static str;
}

/// Builds the strategy for a policy action
pub fn for_action(action: &TransformAction) -> Box<dyn Anonymizer> {
    match action {
        TransformAction::Tokenizer { max_token_len, key } => {
            Box::new(TokenStrategy::new(key.clone(), *max_token_len))
        }
    }
}
