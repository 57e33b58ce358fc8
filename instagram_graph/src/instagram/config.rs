use std::env;

use super::errors::InstagramError;
use super::types::TokenRequest;

pub const DEFAULT_AUTH_URL: &str = "https://api.instagram.com/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://api.instagram.com/oauth/access_token";
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.instagram.com";

/// Scopes requested when `INSTAGRAM_SCOPES` is not set
pub const DEFAULT_SCOPES: &[&str] = &[
    "instagram_basic",
    "instagram_manage_comments",
    "instagram_content_publish",
    "pages_show_list",
];

// Field selections sent to the Graph API. Response shapes depend on these strings.
pub const PROFILE_FIELDS: &str = "id,username,account_type,media_count";
pub const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,thumbnail_url,permalink,timestamp";
pub const COMMENT_FIELDS: &str = "id,text,timestamp,username,like_count";
pub const REPLY_FIELDS: &str = "id,text,timestamp,username,like_count,parent_id";

/// OAuth and Graph API settings, loaded once at process start
///
/// The client credentials are optional here on purpose: their presence is checked
/// by [`InstagramConfig::validate_credentials`] when a code is exchanged, not at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstagramConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub auth_url: String,
    pub token_url: String,
    pub graph_api_url: String,
    pub scopes: Vec<String>,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            graph_api_url: DEFAULT_GRAPH_API_URL.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl InstagramConfig {
    /// Load the configuration from process environment variables
    ///
    /// Fails only when a variable is present but unreadable (not valid unicode).
    pub fn from_env() -> Result<Self, InstagramError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InstagramError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let read = |key: &str| -> Result<Option<String>, InstagramError> {
            match lookup(key) {
                Ok(value) if value.trim().is_empty() => Ok(None),
                Ok(value) => Ok(Some(value.trim().to_string())),
                Err(env::VarError::NotPresent) => Ok(None),
                Err(env::VarError::NotUnicode(_)) => Err(InstagramError::Config(format!(
                    "{key} is not valid unicode"
                ))),
            }
        };

        let defaults = Self::default();
        let scopes = match read("INSTAGRAM_SCOPES")? {
            Some(raw) => {
                let scopes: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if scopes.is_empty() {
                    defaults.scopes
                } else {
                    scopes
                }
            }
            None => defaults.scopes,
        };

        let config = Self {
            client_id: read("INSTAGRAM_CLIENT_ID")?,
            client_secret: read("INSTAGRAM_CLIENT_SECRET")?,
            redirect_uri: read("INSTAGRAM_REDIRECT_URI")?,
            auth_url: read("INSTAGRAM_AUTH_URL")?.unwrap_or(defaults.auth_url),
            token_url: read("INSTAGRAM_TOKEN_URL")?.unwrap_or(defaults.token_url),
            graph_api_url: read("INSTAGRAM_GRAPH_API_URL")?
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.graph_api_url),
            scopes,
        };

        tracing::debug!(
            "Instagram config loaded: auth_url={}, token_url={}, graph_api_url={}, scopes={:?}, client_id set={}, client_secret set={}, redirect_uri set={}",
            config.auth_url,
            config.token_url,
            config.graph_api_url,
            config.scopes,
            config.client_id.is_some(),
            config.client_secret.is_some(),
            config.redirect_uri.is_some(),
        );

        Ok(config)
    }

    /// Comma-joined scope list as sent in the authorization URL
    pub fn scope_string(&self) -> String {
        self.scopes.join(",")
    }

    /// Check that the credentials needed for a code exchange are all present
    pub(crate) fn validate_credentials(&self, code: &str) -> Result<TokenRequest, InstagramError> {
        match (&self.client_id, &self.client_secret, &self.redirect_uri) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Ok(TokenRequest {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                redirect_uri: redirect_uri.clone(),
                code: code.to_string(),
            }),
            _ => Err(InstagramError::Config(
                "Missing required Instagram configuration parameters".to_string(),
            )),
        }
    }
}
