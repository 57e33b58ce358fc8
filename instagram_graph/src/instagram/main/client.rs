use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::instagram::config::{
    COMMENT_FIELDS, InstagramConfig, MEDIA_FIELDS, PROFILE_FIELDS, REPLY_FIELDS,
};
use crate::instagram::errors::InstagramError;
use crate::instagram::types::{
    Comment, CreatedObject, MediaItem, Page, Profile, TokenRequest,
};

use super::utils::{decode_body, get_client, is_empty_body, read_body, require_id, send_error};

/// Outbound calls against the Instagram OAuth and Graph API endpoints
///
/// Every method is a single network call with no caching or retry. The access
/// token is supplied per call and is never stored.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Exchange an authorization code; returns the raw token endpoint body
    async fn exchange_token(&self, request: &TokenRequest) -> Result<Value, InstagramError>;

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, InstagramError>;

    async fn fetch_media(&self, access_token: &str) -> Result<Page<MediaItem>, InstagramError>;

    /// Comments on a media object; an empty upstream body yields an empty page
    async fn fetch_comments(
        &self,
        media_id: &str,
        access_token: &str,
    ) -> Result<Page<Comment>, InstagramError>;

    /// Replies to a comment; an empty upstream body yields an empty page
    async fn fetch_replies(
        &self,
        comment_id: &str,
        access_token: &str,
    ) -> Result<Page<Comment>, InstagramError>;

    async fn create_comment(
        &self,
        media_id: &str,
        message: &str,
        access_token: &str,
    ) -> Result<CreatedObject, InstagramError>;

    async fn reply_to_comment(
        &self,
        comment_id: &str,
        message: &str,
        access_token: &str,
    ) -> Result<CreatedObject, InstagramError>;
}

/// [`GraphApi`] over HTTP with a shared `reqwest` client
#[derive(Clone)]
pub struct InstagramGraphClient {
    http: reqwest::Client,
    config: Arc<InstagramConfig>,
}

impl InstagramGraphClient {
    pub fn new(config: Arc<InstagramConfig>) -> Result<Self, InstagramError> {
        Ok(Self {
            http: get_client()?,
            config,
        })
    }

    fn graph_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.graph_api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_edge(
        &self,
        path: &str,
        fields: &str,
        access_token: &str,
        operation: &str,
    ) -> Result<String, InstagramError> {
        let url = self.graph_url(path);
        tracing::debug!("{}: GET {} fields={}", operation, url, fields);

        let response = self
            .http
            .get(&url)
            .query(&[("fields", fields), ("access_token", access_token)])
            .send()
            .await
            .map_err(|e| send_error(operation, e))?;

        read_body(response, operation).await
    }

    async fn post_message(
        &self,
        path: &str,
        message: &str,
        access_token: &str,
        operation: &str,
    ) -> Result<CreatedObject, InstagramError> {
        let url = self.graph_url(path);
        tracing::debug!("{}: POST {}", operation, url);

        let response = self
            .http
            .post(&url)
            .json(&json!({
                "message": message,
                "access_token": access_token,
            }))
            .send()
            .await
            .map_err(|e| send_error(operation, e))?;

        let body = read_body(response, operation).await?;
        decode_body(&body, operation)
    }

    async fn get_comment_page(
        &self,
        path: &str,
        fields: &str,
        access_token: &str,
        operation: &str,
    ) -> Result<Page<Comment>, InstagramError> {
        let body = self.get_edge(path, fields, access_token, operation).await?;
        if is_empty_body(&body) {
            tracing::debug!("{}: empty body, returning an empty page", operation);
            return Ok(Page::default());
        }
        decode_body(&body, operation)
    }
}

#[async_trait]
impl GraphApi for InstagramGraphClient {
    async fn exchange_token(&self, request: &TokenRequest) -> Result<Value, InstagramError> {
        let operation = "Token exchange";
        tracing::debug!(
            "Token exchange request: token_url={}, redirect_uri={}, grant_type=authorization_code",
            self.config.token_url,
            request.redirect_uri
        );

        let response = self
            .http
            .post(self.config.token_url.as_str())
            .form(&request.form_fields())
            .send()
            .await
            .map_err(|e| send_error(operation, e))?;

        let body = read_body(response, operation).await?;
        if is_empty_body(&body) {
            return Err(InstagramError::MalformedResponse(
                "empty token response".to_string(),
            ));
        }
        decode_body(&body, operation)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, InstagramError> {
        let operation = "Fetch profile";
        let body = self
            .get_edge("me", PROFILE_FIELDS, access_token, operation)
            .await?;
        decode_body(&body, operation)
    }

    async fn fetch_media(&self, access_token: &str) -> Result<Page<MediaItem>, InstagramError> {
        let operation = "Fetch media";
        let body = self
            .get_edge("me/media", MEDIA_FIELDS, access_token, operation)
            .await?;
        decode_body(&body, operation)
    }

    async fn fetch_comments(
        &self,
        media_id: &str,
        access_token: &str,
    ) -> Result<Page<Comment>, InstagramError> {
        require_id(media_id, "Media ID")?;
        self.get_comment_page(
            &format!("{media_id}/comments"),
            COMMENT_FIELDS,
            access_token,
            "Fetch comments",
        )
        .await
    }

    async fn fetch_replies(
        &self,
        comment_id: &str,
        access_token: &str,
    ) -> Result<Page<Comment>, InstagramError> {
        require_id(comment_id, "Comment ID")?;
        self.get_comment_page(
            &format!("{comment_id}/replies"),
            REPLY_FIELDS,
            access_token,
            "Fetch replies",
        )
        .await
    }

    async fn create_comment(
        &self,
        media_id: &str,
        message: &str,
        access_token: &str,
    ) -> Result<CreatedObject, InstagramError> {
        require_id(media_id, "Media ID")?;
        self.post_message(
            &format!("{media_id}/comments"),
            message,
            access_token,
            "Create comment",
        )
        .await
    }

    async fn reply_to_comment(
        &self,
        comment_id: &str,
        message: &str,
        access_token: &str,
    ) -> Result<CreatedObject, InstagramError> {
        require_id(comment_id, "Comment ID")?;
        self.post_message(
            &format!("{comment_id}/replies"),
            message,
            access_token,
            "Reply to comment",
        )
        .await
    }
}
