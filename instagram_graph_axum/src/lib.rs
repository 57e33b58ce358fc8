mod auth;
mod config;
mod error;
mod instagram;
mod router;

pub use auth::BearerToken;
pub use config::INSTAGRAM_FRONTEND_URL;
pub use error::{ErrorBody, IntoResponseError};
pub use router::{instagram_router, instagram_router_no_trace};

// Re-export the core types so applications only need this crate
pub use instagram_graph::{INSTAGRAM_ROUTE_PREFIX, InstagramConfig, InstagramError, InstagramService};
