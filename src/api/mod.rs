//! Transport seam between the client and the control backend.
//!
//! DESIGN
//! ======
//! `Transport` only moves bytes: it reports the HTTP status and raw body
//! and never interprets them. Message selection, fallbacks and decoding
//! live in the client so they can be tested against an in-memory fake.

pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

use serde_json::Value;

use crate::error::ClientError;

pub use http::HttpTransport;

/// Raw response as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    /// Final URL after redirects.
    pub url: String,
}

impl Reply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP surface used by [`crate::RemoteControlClient`].
///
/// Implementations return `Err` only for transport-level failures
/// ([`ClientError::Transport`]); any HTTP status, success or not, is `Ok`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Reply, ClientError>;

    /// POST a JSON body. `None` sends an empty JSON object.
    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Reply, ClientError>;
}
