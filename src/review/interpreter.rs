//! Turns a status record into the notification text.

use crate::error::ReviewError;
use crate::review::status::{ReviewStatus, StatusRecord};

/// Build the user-facing message for `record`.
pub fn parse_status(record: &StatusRecord) -> Result<String, ReviewError> {
    let name = record.name.as_deref().ok_or(ReviewError::NameMissing)?;
    let code = record.status.as_deref().ok_or(ReviewError::StatusMissing)?;
    let status = ReviewStatus::from_code(code)
        .ok_or_else(|| ReviewError::UndocumentedStatus(code.to_string()))?;

    Ok(format!(
        "Changed review status for \"{}\". {}",
        name,
        status.verdict()
    ))
}
