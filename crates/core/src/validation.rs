//! Presence checks for create payloads.
//!
//! Request DTOs deserialize every field as `Option` so that a missing field
//! surfaces as a readable validation message instead of a serde rejection.

use crate::error::CoreError;

/// Ensure every `(field_name, is_present)` pair is present.
///
/// The error message names all missing fields in declaration order.
///
/// ```
/// use cityguide_core::validation::require_fields;
/// assert!(require_fields(&[("name", true)]).is_ok());
/// let err = require_fields(&[("name", true), ("category_id", false)]).unwrap_err();
/// assert_eq!(err.to_string(), "Validation failed: Missing required field: category_id.");
/// ```
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    match missing.len() {
        0 => Ok(()),
        1 => Err(CoreError::Validation(format!(
            "Missing required field: {}.",
            missing[0]
        ))),
        _ => Err(CoreError::Validation(format!(
            "Missing required fields: {}.",
            missing.join(", ")
        ))),
    }
}
