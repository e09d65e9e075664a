//! Policy compilation and the policy document model

pub mod compiler;
pub mod document;

pub use compiler::{
    compile_policy, policy_file_name, resolve_column_names, write_policy, ResolvedColumn,
    UnsupportedTransformPolicy,
};
pub use document::{
    PolicyAction, PolicyDocument, PolicyRule, RuleMatch, TransformAction, POLICY_LABEL,
    POLICY_VERSION,
};
