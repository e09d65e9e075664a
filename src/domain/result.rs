//! Result type alias for Cloak

use super::errors::CloakError;

/// Result type alias for Cloak operations
///
/// ```
/// use cloak::domain::result::Result;
/// use cloak::domain::errors::CloakError;
///
/// fn failing_function() -> Result<()> {
///     Err(CloakError::ConfigValue("Invalid delimiter".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, CloakError>;
