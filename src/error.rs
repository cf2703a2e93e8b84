//! Error types for reviewbot.

/// How the reconciliation loop reacts to a failed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected steady state: logged at debug level, never announced.
    NonCritical,
    /// The review service could not be reached or refused the request.
    Critical,
    /// The service answered, but with a payload we cannot interpret.
    DataShape,
}

/// Failures produced while fetching and interpreting review statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    /// The record list was present but empty.
    #[error("no review status changes")]
    NoChanges { current_date: Option<i64> },

    #[error("review endpoint unreachable: {0}")]
    Transport(String),

    #[error("review endpoint returned status {0}")]
    HttpStatus(u16),

    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("response is neither an object nor a list of objects")]
    UnexpectedShape,

    #[error("no `{0}` key in response")]
    MissingField(String),

    #[error("`{0}` in response is not a list")]
    NotAList(String),

    #[error("malformed status record: {0}")]
    MalformedRecord(String),

    #[error("name missing")]
    NameMissing,

    #[error("status missing")]
    StatusMissing,

    #[error("undocumented status `{0}`")]
    UndocumentedStatus(String),
}

impl ReviewError {
    /// Classify this error for the reconciliation loop.
    pub fn severity(&self) -> Severity {
        match self {
            ReviewError::NoChanges { .. } => Severity::NonCritical,
            ReviewError::Transport(_) | ReviewError::HttpStatus(_) => Severity::Critical,
            ReviewError::InvalidBody(_)
            | ReviewError::UnexpectedShape
            | ReviewError::MissingField(_)
            | ReviewError::NotAList(_)
            | ReviewError::MalformedRecord(_)
            | ReviewError::NameMissing
            | ReviewError::StatusMissing
            | ReviewError::UndocumentedStatus(_) => Severity::DataShape,
        }
    }

    /// Checkpoint the service reported alongside a non-critical answer.
    pub fn checkpoint_candidate(&self) -> Option<i64> {
        match self {
            ReviewError::NoChanges { current_date } => *current_date,
            _ => None,
        }
    }
}

/// Notification delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send to {channel}: {reason}")]
    SendFailed { channel: String, reason: String },

    #[error("{channel} API returned status {status}: {body}")]
    HttpStatus {
        channel: String,
        status: u16,
        body: String,
    },

    #[error("{channel} API error: {description}")]
    Rejected {
        channel: String,
        description: String,
    },

    #[error("Invalid response from {channel}: {reason}")]
    InvalidResponse { channel: String, reason: String },
}

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
