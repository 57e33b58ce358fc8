//! instagram_graph - Instagram OAuth and Graph API orchestration
//!
//! This crate drives the Instagram authorization-code flow and wraps the Graph API
//! calls a web backend needs to show a user's profile and media and to manage comments.
//! Access tokens are supplied by the caller on every call; nothing is persisted here.

mod config;
mod instagram;

pub use config::INSTAGRAM_ROUTE_PREFIX;

pub use instagram::{
    Comment, CreatedObject, GraphApi, InstagramConfig, InstagramError, InstagramGraphClient,
    InstagramService, MediaItem, Page, Profile, TokenRequest, TokenResponse,
};

pub use instagram::{
    COMMENT_FIELDS, DEFAULT_AUTH_URL, DEFAULT_GRAPH_API_URL, DEFAULT_SCOPES, DEFAULT_TOKEN_URL,
    MEDIA_FIELDS, PROFILE_FIELDS, REPLY_FIELDS,
};
