use thiserror::Error;

/// Failures surfaced by report fetching and moderation actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ModerationError {
    /// Short message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to reach the moderation service".into(),
            Self::Timeout => "The moderation service took too long to respond".into(),
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Api { .. } => "The moderation service rejected the request".into(),
            Self::MalformedPayload(_) => "Received an unexpected response".into(),
            Self::InvalidRequest(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ModerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            tracing::warn!(reqwest_timeout = %err);
            ModerationError::Timeout
        } else if err.is_connect() {
            tracing::warn!(reqwest_connect = %err);
            ModerationError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            tracing::warn!(reqwest_decode = %err);
            ModerationError::MalformedPayload(err.to_string())
        } else if err.is_builder() {
            tracing::error!(reqwest_builder = %err);
            ModerationError::InvalidRequest(err.to_string())
        } else {
            tracing::error!(reqwest_error = %err);
            ModerationError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ModerationError {
    fn from(err: serde_json::Error) -> Self {
        ModerationError::MalformedPayload(err.to_string())
    }
}
