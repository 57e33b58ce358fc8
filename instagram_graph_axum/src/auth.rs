use axum::{Json, RequestPartsExt, extract::FromRequestParts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use http::{StatusCode, request::Parts};

use super::error::{ErrorBody, error_response};

/// Instagram access token taken from `Authorization: Bearer <token>`
///
/// The token is forwarded to the Graph API as-is and never stored. A missing or
/// empty token rejects the request with 401 before the handler runs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

fn missing_token() -> (StatusCode, Json<ErrorBody>) {
    error_response(StatusCode::UNAUTHORIZED, "Access token is required")
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorBody>);

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|e| {
                tracing::debug!("No bearer token on {}: {}", path, e);
                missing_token()
            })?;

        let token = bearer.token().trim();
        if token.is_empty() {
            tracing::debug!("Empty bearer token on {}", path);
            return Err(missing_token());
        }

        Ok(Self(token.to_string()))
    }
}
