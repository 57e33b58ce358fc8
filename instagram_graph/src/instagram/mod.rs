mod config;
mod errors;
mod main;
mod types;

pub use config::{
    COMMENT_FIELDS, DEFAULT_AUTH_URL, DEFAULT_GRAPH_API_URL, DEFAULT_SCOPES, DEFAULT_TOKEN_URL,
    InstagramConfig, MEDIA_FIELDS, PROFILE_FIELDS, REPLY_FIELDS,
};
pub use errors::InstagramError;
pub use main::{GraphApi, InstagramGraphClient, InstagramService};
pub use types::{
    Comment, CreatedObject, MediaItem, Page, Profile, TokenRequest, TokenResponse,
};
