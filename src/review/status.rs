//! Status records and the verdict table.

use serde_json::Value;

use crate::error::ReviewError;

/// One reviewed submission as reported by the review service.
///
/// Both fields are optional at this layer; the interpreter decides what is
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRecord {
    /// Human-readable name of the submission.
    pub name: Option<String>,
    /// Raw status code, looked up in [`ReviewStatus`].
    pub status: Option<String>,
}

impl StatusRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status: Some(status.into()),
        }
    }

    /// Read a record from its wire form.
    ///
    /// Only the enclosing value has to be an object. Non-string field values
    /// are rendered as JSON text; `null` counts as absent. Unknown fields are
    /// ignored.
    pub fn from_value(value: &Value) -> Result<Self, ReviewError> {
        let object = value.as_object().ok_or_else(|| {
            ReviewError::MalformedRecord(format!("expected an object, got {value}"))
        })?;

        Ok(Self {
            name: object.get("homework_name").and_then(field_text),
            status: object.get("status").and_then(field_text),
        })
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Closed set of review states the service documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    /// Reviewer accepted the work.
    Approved,
    /// Work was picked up by a reviewer.
    Reviewing,
    /// Reviewer left remarks.
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Approved,
        ReviewStatus::Reviewing,
        ReviewStatus::Rejected,
    ];

    /// Look up a wire status code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Display text sent to the user.
    pub fn verdict(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            ReviewStatus::Reviewing => "Работа взята на проверку ревьюером.",
            ReviewStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}
