use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use instagram_graph::{
    Comment, CreatedObject, InstagramError, InstagramService, MediaItem, Page, Profile,
};

use super::auth::BearerToken;
use super::config::{INSTAGRAM_FRONTEND_URL, frontend_redirect};
use super::error::{ErrorResponse, IntoResponseError, callback_status_for, error_response};

pub(super) fn router() -> Router<InstagramService> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .route("/media", get(media))
        .route(
            "/media/{media_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route("/media/{media_id}/comments/reply", post(reply_to_comment))
}

/// Query parameters Instagram sends back to the redirect URI
#[derive(Debug, Default, Deserialize)]
pub(super) struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_reason: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CreateCommentRequest {
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ReplyRequest {
    #[serde(rename = "commentId", alias = "comment_id")]
    comment_id: Option<String>,
    message: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn login(State(service): State<InstagramService>) -> Redirect {
    let auth_url = service.build_authorization_url();
    tracing::info!("Redirecting to Instagram authorization: {}", auth_url);
    Redirect::to(&auth_url)
}

async fn callback(
    State(service): State<InstagramService>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, ErrorResponse> {
    if let Some(error) = params.error.as_deref() {
        let message = params.error_description.as_deref().unwrap_or(error);
        tracing::warn!(
            "Instagram authorization denied: error={}, reason={:?}, description={:?}",
            error,
            params.error_reason,
            params.error_description
        );
        return Ok(Redirect::to(&frontend_redirect(
            INSTAGRAM_FRONTEND_URL.as_str(),
            &[("error", message)],
        )));
    }

    let Some(code) = non_empty(params.code) else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Authorization code is required",
        ));
    };

    match service.exchange_code_for_token(&code).await {
        Ok(token) => Ok(Redirect::to(&frontend_redirect(
            INSTAGRAM_FRONTEND_URL.as_str(),
            &[("token", token.access_token.as_str())],
        ))),
        Err(e) => {
            let status = callback_status_for(&e);
            tracing::error!("Callback error ({}): {}", status, e);
            let message = match e {
                InstagramError::Config(_) => "Instagram login is not configured",
                InstagramError::MalformedResponse(_) => "Invalid response from Instagram",
                _ => "Failed to exchange code for token",
            };
            Ok(Redirect::to(&frontend_redirect(
                INSTAGRAM_FRONTEND_URL.as_str(),
                &[("error", message), ("status", status.as_str())],
            )))
        }
    }
}

/// Tokens live on the client, so there is nothing to invalidate here
async fn logout(_token: BearerToken) -> Json<Value> {
    tracing::debug!("Logout acknowledged");
    Json(json!({ "message": "Logged out successfully" }))
}

async fn profile(
    token: BearerToken,
    State(service): State<InstagramService>,
) -> Result<Json<Profile>, ErrorResponse> {
    service
        .get_profile(token.as_str())
        .await
        .map(Json)
        .into_response_error("Failed to fetch profile")
}

async fn media(
    token: BearerToken,
    State(service): State<InstagramService>,
) -> Result<Json<Page<MediaItem>>, ErrorResponse> {
    service
        .get_media(token.as_str())
        .await
        .map(Json)
        .into_response_error("Failed to fetch media")
}

async fn list_comments(
    token: BearerToken,
    State(service): State<InstagramService>,
    Path(media_id): Path<String>,
) -> Result<Json<Page<Comment>>, ErrorResponse> {
    service
        .get_comments_with_replies(&media_id, token.as_str())
        .await
        .map(Json)
        .into_response_error("Failed to fetch comments")
}

async fn create_comment(
    token: BearerToken,
    State(service): State<InstagramService>,
    Path(media_id): Path<String>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<Json<CreatedObject>, ErrorResponse> {
    let request = payload.map(|Json(body)| body).unwrap_or_else(|e| {
        tracing::debug!("Unreadable comment body: {}", e);
        CreateCommentRequest::default()
    });
    let Some(message) = non_empty(request.message) else {
        return Err(error_response(StatusCode::BAD_REQUEST, "Message is required"));
    };

    service
        .create_comment(&media_id, &message, token.as_str())
        .await
        .map(Json)
        .into_response_error("Failed to create comment")
}

async fn reply_to_comment(
    token: BearerToken,
    State(service): State<InstagramService>,
    Path(media_id): Path<String>,
    payload: Result<Json<ReplyRequest>, JsonRejection>,
) -> Result<Json<CreatedObject>, ErrorResponse> {
    let request = payload.map(|Json(body)| body).unwrap_or_else(|e| {
        tracing::debug!("Unreadable reply body: {}", e);
        ReplyRequest::default()
    });
    let (Some(comment_id), Some(message)) =
        (non_empty(request.comment_id), non_empty(request.message))
    else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Comment ID and message are required",
        ));
    };

    tracing::debug!("Replying to comment {} on media {}", comment_id, media_id);
    service
        .reply_to_comment(&comment_id, &message, token.as_str())
        .await
        .map(Json)
        .into_response_error("Failed to reply to comment")
}
