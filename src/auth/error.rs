use thiserror::Error;

/// Error payload the hosted service attaches to a resolved response.
///
/// This is the expected, recoverable shape: the request went through and
/// the backend explained what it disliked (wrong password, unconfirmed
/// email, and so on). The message is safe to show verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

/// The two failure shapes every auth call site distinguishes.
///
/// Both variants display as their bare detail, without a prefix, so callers
/// composing fixed alert/log strings get exactly the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend resolved the call with a structured error outcome.
    #[error("{0}")]
    Api(ApiError),
    /// Transport failure, malformed payload, or anything else that never
    /// became a structured outcome.
    #[error("{0}")]
    Unexpected(String),
}

impl AuthError {
    /// Raw string representation of the failure, for alerts and log sinks.
    pub fn detail(&self) -> &str {
        match self {
            AuthError::Api(error) => &error.message,
            AuthError::Unexpected(raw) => raw,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Unexpected(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Unexpected(error.to_string())
    }
}
