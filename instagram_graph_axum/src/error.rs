use axum::Json;
use http::StatusCode;
use instagram_graph::InstagramError;
use serde::{Deserialize, Serialize};

/// JSON body of every error response: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Status code for a failure on a JSON route
pub(crate) fn status_for(err: &InstagramError) -> StatusCode {
    match err {
        InstagramError::Validation(_) => StatusCode::BAD_REQUEST,
        InstagramError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status code reported to the front end when the OAuth callback fails
pub(crate) fn callback_status_for(err: &InstagramError) -> StatusCode {
    match err {
        InstagramError::Config(_) | InstagramError::Validation(_) => StatusCode::BAD_REQUEST,
        InstagramError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    /// Map the error to a status code and a JSON body
    ///
    /// `message` is the generic text returned to the caller; the detailed error
    /// is logged. Validation errors return their own message.
    fn into_response_error(self, message: &str) -> Result<T, (StatusCode, Json<ErrorBody>)>;
}

impl<T> IntoResponseError<T> for Result<T, InstagramError> {
    fn into_response_error(self, message: &str) -> Result<T, (StatusCode, Json<ErrorBody>)> {
        self.map_err(|e| {
            let status = status_for(&e);
            tracing::error!("{}: {} (responding {})", message, e, status);
            match e {
                InstagramError::Validation(detail) => error_response(status, detail),
                _ => error_response(status, message),
            }
        })
    }
}
