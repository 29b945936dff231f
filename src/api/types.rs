//! Wire types for the control backend's JSON bodies.
//!
//! Decoding is lenient about missing or null fields (older backends omit
//! `show_active` and `youtube_subscribers`) but strict about shape: a body
//! that is not a JSON object is malformed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ClientError;

pub const DEFAULT_SHOW_DURATION: &str = "0:00:00";

// =============================================================================
// RESPONSES
// =============================================================================

/// `GET /api/status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBody {
    #[serde(deserialize_with = "null_as_default")]
    pub scarepi_initialized: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub motion_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// `GET /api/audience/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsBody {
    #[serde(deserialize_with = "null_as_default")]
    pub total_audience: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub youtube_subscribers: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_scares: u64,
    pub show_duration: String,
}

impl Default for StatsBody {
    fn default() -> Self {
        Self {
            total_audience: 0,
            youtube_subscribers: 0,
            total_scares: 0,
            show_duration: DEFAULT_SHOW_DURATION.to_owned(),
        }
    }
}

/// Body of every POST endpoint. `success` is only sent by `/api/audience/join`.
///
/// Read field by field from the JSON object: a field of an unexpected type
/// counts as absent rather than failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBody {
    pub message: Option<String>,
    pub error: Option<String>,
    pub success: Option<bool>,
}

impl MessageBody {
    /// Parse a POST response body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Malformed`] if the body is not a JSON object.
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        let value = parse_object(body)?;
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Ok(Self {
            message: text("message"),
            error: text("error"),
            success: value.get("success").and_then(Value::as_bool),
        })
    }

    /// Non-empty `message`, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        non_empty(self.message.as_deref())
    }

    /// Non-empty `error`, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// `POST /api/audience/join`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceRegistration {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_heard: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub subscribe_youtube: bool,
    #[serde(default = "default_true")]
    pub subscribe_updates: bool,
}

impl AudienceRegistration {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            social_media: None,
            how_heard: None,
            interests: Vec::new(),
            subscribe_youtube: false,
            subscribe_updates: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode a JSON object body.
///
/// # Errors
///
/// Returns [`ClientError::Malformed`] if the body is not a JSON object of the expected shape.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let value = parse_object(body)?;
    serde_json::from_value(value).map_err(|e| ClientError::Malformed(e.to_string()))
}

fn parse_object(body: &str) -> Result<Value, ClientError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ClientError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ClientError::Malformed(format!("expected JSON object, got {}", json_kind(&value))));
    }
    Ok(value)
}

/// `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pick the text for a failed response: `error`, then `message`, then `fallback`.
///
/// Bodies that are not JSON objects count as carrying neither field.
#[must_use]
pub fn failure_message(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback.to_owned();
    };
    let field = |key: &str| non_empty(value.get(key).and_then(Value::as_str));
    field("error")
        .or_else(|| field("message"))
        .unwrap_or(fallback)
        .to_owned()
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
