use serde::Deserialize;
use thiserror::Error;

/// Errors raised by the Instagram client and orchestration service
///
/// Each failure class is its own variant so callers can tell a misconfigured
/// deployment apart from a rejected or unreachable upstream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstagramError {
    /// A required setting is missing or the environment could not be read
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream answered 2xx but the body lacks what we need
    #[error("Invalid response format from Instagram API: {0}")]
    MalformedResponse(String),

    /// Upstream answered with a non-2xx status
    #[error("Instagram API Error: {status} - {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The request was sent but no response came back
    #[error("No response received from Instagram API: {0}")]
    Unreachable(String),

    /// Pass-through failure carrying the upstream error message when one was available
    #[error("Instagram API request failed: {message}")]
    Api { status: Option<u16>, message: String },

    /// The local HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    message: Option<String>,
}

impl InstagramError {
    /// The `error.message` field of a Graph API error body, if this error carries one
    pub fn upstream_message(&self) -> Option<String> {
        match self {
            Self::UpstreamStatus { body, .. } => serde_json::from_str::<GraphErrorBody>(body)
                .ok()
                .and_then(|parsed| parsed.error.message)
                .or_else(|| {
                    // The token endpoint reports errors as a flat object
                    serde_json::from_str::<serde_json::Value>(body)
                        .ok()
                        .and_then(|value| {
                            value
                                .get("error_message")
                                .and_then(|m| m.as_str())
                                .map(str::to_string)
                        })
                }),
            Self::Api { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    /// Upstream HTTP status, when the failure came with one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Rewrap an upstream failure for a pass-through operation
    ///
    /// Upstream failures become [`InstagramError::Api`] with the Graph error message,
    /// or `fallback` when the body carried none. Local errors and malformed
    /// responses are returned unchanged.
    pub(crate) fn into_api_error(self, fallback: &str) -> Self {
        match self {
            Self::UpstreamStatus { .. } => Self::Api {
                status: self.status(),
                message: self
                    .upstream_message()
                    .unwrap_or_else(|| fallback.to_string()),
            },
            Self::Unreachable(_) => Self::Api {
                status: None,
                message: fallback.to_string(),
            },
            other => other,
        }
    }

    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Config(msg) => tracing::error!("Configuration error: {}", msg),
            Self::Validation(msg) => tracing::warn!("Validation error: {}", msg),
            Self::MalformedResponse(msg) => tracing::error!("Malformed upstream response: {}", msg),
            Self::UpstreamStatus { status, body } => {
                tracing::error!("Instagram API returned {}: {}", status, body)
            }
            Self::Unreachable(msg) => tracing::error!("Instagram API unreachable: {}", msg),
            Self::Api { status, message } => {
                tracing::error!("Instagram API request failed ({:?}): {}", status, message)
            }
            Self::Client(msg) => tracing::error!("HTTP client error: {}", msg),
        }
        self
    }
}
