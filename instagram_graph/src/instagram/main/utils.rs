use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::instagram::errors::InstagramError;

pub(super) fn get_client() -> Result<reqwest::Client, InstagramError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| InstagramError::Client(e.to_string()))
}

/// Read the body of an upstream response, classifying non-2xx statuses
///
/// Returns the raw body text of a successful response.
pub(super) async fn read_body(
    response: reqwest::Response,
    operation: &str,
) -> Result<String, InstagramError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        InstagramError::Unreachable(format!(
            "{operation}: failed to read response body: {}",
            e.without_url()
        ))
    })?;

    if !status.is_success() {
        tracing::error!("{} failed with status {}: {}", operation, status, body);
        return Err(InstagramError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }

    tracing::debug!("{} succeeded with status {}", operation, status);
    Ok(body)
}

/// Map a transport failure from `send()`; no response was received
///
/// The URL is dropped from the error since GET edges carry the access token in
/// the query string.
pub(super) fn send_error(operation: &str, err: reqwest::Error) -> InstagramError {
    let err = err.without_url();
    tracing::error!("{} request failed: {}", operation, err);
    InstagramError::Unreachable(format!("{operation}: {err}"))
}

pub(super) fn decode_body<T: DeserializeOwned>(
    body: &str,
    operation: &str,
) -> Result<T, InstagramError> {
    serde_json::from_str(body).map_err(|e| {
        InstagramError::MalformedResponse(format!("{operation}: failed to decode body: {e}"))
    })
}

/// True when an upstream body carries nothing to decode
pub(super) fn is_empty_body(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.is_empty() || trimmed == "null"
}

/// Reject ids that are blank or could change the upstream request path
///
/// Graph object ids are digits and underscores; letters and `-` are accepted
/// as well. Anything else (`/`, `?`, `#`, `.`, whitespace, `%`) is refused.
pub(super) fn require_id(value: &str, what: &str) -> Result<(), InstagramError> {
    if value.trim().is_empty() {
        return Err(InstagramError::Validation(format!("{what} is required")));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(InstagramError::Validation(format!("{what} is invalid")));
    }
    Ok(())
}
