pub mod category;
pub mod membership;
pub mod notification;
pub mod predict;
pub mod product;
pub mod report;
pub mod sale;
pub mod stock;

use shared::utils::parse_datetime;
use validator::ValidationError;

pub(crate) fn validate_datetime(value: &str) -> Result<(), ValidationError> {
    match parse_datetime(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("datetime").with_message("Must be an ISO 8601 date".into())),
    }
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("Must not be blank".into()))
    } else {
        Ok(())
    }
}

/// Treats `Some("")` and whitespace as absent, matching the partial-update
/// routes where a blank field keeps the stored value.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
