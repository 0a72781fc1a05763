//! Result type alias for Geotitres

use super::errors::GeotitresError;

/// Result type alias for Geotitres operations
///
/// # Examples
///
/// ```
/// use geotitres::domain::result::Result;
/// use geotitres::domain::errors::GeotitresError;
///
/// fn failing_function() -> Result<()> {
///     Err(GeotitresError::Storage("Output directory is read-only".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GeotitresError>;
