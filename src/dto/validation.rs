//! Validation helpers for DTOs.

use validator::ValidationError;

/// Rejects text that is empty once surrounding whitespace is removed.
///
/// # Examples
///
/// ```ignore
/// validate_not_blank("Ada")  // Ok
/// validate_not_blank("")     // Err
/// validate_not_blank("   ")  // Err
/// ```
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }

    Ok(())
}
