//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every runtime failure is recovered by the caller: polls mark the display,
//! commands turn the error into a notification. Malformed bodies are reported
//! exactly like transport failures since neither carries a server message.

/// Errors produced by remote calls against the control backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (unreachable, timeout, reset).
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("{0}")]
    Malformed(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The configured base URL is not an http(s) origin.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Text shown to the user when this error ends a command.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Application { message, .. } => message.clone(),
            Self::Transport(text) | Self::Malformed(text) => format!("Network error: {text}"),
            other => other.to_string(),
        }
    }

    /// HTTP status for application failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
