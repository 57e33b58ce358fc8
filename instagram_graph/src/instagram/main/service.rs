use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::instagram::config::InstagramConfig;
use crate::instagram::errors::InstagramError;
use crate::instagram::types::{
    Comment, CreatedObject, MediaItem, Page, Profile, TokenResponse,
};

use super::client::{GraphApi, InstagramGraphClient};
use super::utils::require_id;

/// Orchestrates the OAuth flow and multi-step Graph API reads
///
/// Built once per process and handed to request handlers. Cloning is cheap; the
/// configuration and client are shared.
#[derive(Clone)]
pub struct InstagramService {
    config: Arc<InstagramConfig>,
    client: Arc<dyn GraphApi>,
}

impl InstagramService {
    /// Build the service with the HTTP Graph API client
    pub fn new(config: InstagramConfig) -> Result<Self, InstagramError> {
        let config = Arc::new(config);
        let client = InstagramGraphClient::new(config.clone())?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    /// Build the service around any [`GraphApi`] implementation
    pub fn with_client(config: InstagramConfig, client: Arc<dyn GraphApi>) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn config(&self) -> &InstagramConfig {
        &self.config
    }

    /// Authorization endpoint URL the user is redirected to
    ///
    /// Pure function of the configuration. A missing client id or redirect URI
    /// is sent as an empty value; the exchange step reports the misconfiguration.
    pub fn build_authorization_url(&self) -> String {
        let client_id = self.config.client_id.as_deref().unwrap_or_default();
        let redirect_uri = self.config.redirect_uri.as_deref().unwrap_or_default();
        let scope = self.config.scope_string();
        let params = [
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("response_type", "code"),
        ];

        match Url::parse_with_params(&self.config.auth_url, &params) {
            Ok(url) => url.to_string(),
            Err(e) => {
                // Not a parseable absolute URL; still produce a usable query string.
                tracing::warn!("Authorization URL {} is not absolute: {}", self.config.auth_url, e);
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(params)
                    .finish();
                format!("{}?{}", self.config.auth_url, query)
            }
        }
    }

    /// Exchange an authorization code for an access token
    ///
    /// Fails with [`InstagramError::Config`] before any request when a credential
    /// is missing, and with [`InstagramError::MalformedResponse`] when the token
    /// endpoint answers without an `access_token`.
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<TokenResponse, InstagramError> {
        if code.trim().is_empty() {
            return Err(InstagramError::Validation(
                "Authorization code is required".to_string(),
            ));
        }

        let request = self
            .config
            .validate_credentials(code)
            .map_err(InstagramError::log)?;

        let body = self
            .client
            .exchange_token(&request)
            .await
            .map_err(InstagramError::log)?;

        let has_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .is_some_and(|token| !token.is_empty());
        if !has_token {
            return Err(InstagramError::MalformedResponse(
                "token response has no access_token".to_string(),
            )
            .log());
        }

        let token: TokenResponse = serde_json::from_value(body).map_err(|e| {
            InstagramError::MalformedResponse(format!("token response: {e}")).log()
        })?;

        tracing::info!(
            "Exchanged authorization code for access token (user_id: {:?})",
            token.user_id
        );
        Ok(token)
    }

    pub async fn get_profile(&self, access_token: &str) -> Result<Profile, InstagramError> {
        self.client
            .fetch_profile(access_token)
            .await
            .map_err(|e| e.log().into_api_error("Failed to fetch user profile"))
    }

    pub async fn get_media(&self, access_token: &str) -> Result<Page<MediaItem>, InstagramError> {
        self.client
            .fetch_media(access_token)
            .await
            .map_err(|e| e.log().into_api_error("Failed to fetch user media"))
    }

    /// Comments on a media object, each with its replies attached
    ///
    /// Replies are fetched concurrently, one request per comment. A failed reply
    /// fetch leaves that comment with no replies; only a failure of the comment
    /// fetch itself fails the call. Comment order and `paging` are preserved.
    pub async fn get_comments_with_replies(
        &self,
        media_id: &str,
        access_token: &str,
    ) -> Result<Page<Comment>, InstagramError> {
        require_id(media_id, "Media ID")?;

        let page = self
            .client
            .fetch_comments(media_id, access_token)
            .await
            .map_err(|e| e.log().into_api_error("Failed to fetch comments"))?;

        tracing::debug!(
            "Fetched {} comments for media {}, fetching replies",
            page.data.len(),
            media_id
        );

        let Page { data, paging } = page;
        let client = &self.client;
        let data = join_all(data.into_iter().map(|mut comment| async move {
            match client.fetch_replies(&comment.id, access_token).await {
                Ok(replies) => comment.replies = Some(replies.data),
                Err(e) => {
                    tracing::warn!(
                        "Failed to fetch replies for comment {}: {}",
                        comment.id,
                        e
                    );
                    comment.replies = Some(Vec::new());
                }
            }
            comment
        }))
        .await;

        Ok(Page { data, paging })
    }

    pub async fn create_comment(
        &self,
        media_id: &str,
        message: &str,
        access_token: &str,
    ) -> Result<CreatedObject, InstagramError> {
        require_id(media_id, "Media ID")?;
        require_message(message)?;

        let created = self
            .client
            .create_comment(media_id, message, access_token)
            .await
            .map_err(|e| e.log().into_api_error("Failed to create comment"))?;

        tracing::info!("Created comment {} on media {}", created.id, media_id);
        Ok(created)
    }

    pub async fn reply_to_comment(
        &self,
        comment_id: &str,
        message: &str,
        access_token: &str,
    ) -> Result<CreatedObject, InstagramError> {
        require_id(comment_id, "Comment ID")?;
        require_message(message)?;

        let created = self
            .client
            .reply_to_comment(comment_id, message, access_token)
            .await
            .map_err(|e| e.log().into_api_error("Failed to reply to comment"))?;

        tracing::info!("Created reply {} to comment {}", created.id, comment_id);
        Ok(created)
    }
}

fn require_message(message: &str) -> Result<(), InstagramError> {
    if message.trim().is_empty() {
        return Err(InstagramError::Validation("Message is required".to_string()));
    }
    Ok(())
}
