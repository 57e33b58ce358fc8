//! Central configuration for the instagram_graph crate

use std::sync::LazyLock;

/// Route prefix under which the Instagram endpoints are mounted
///
/// Default: "/api/instagram"
pub static INSTAGRAM_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("INSTAGRAM_ROUTE_PREFIX").unwrap_or_else(|_| "/api/instagram".to_string())
});
