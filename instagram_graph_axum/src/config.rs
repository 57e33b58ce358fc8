//! Settings used only by the HTTP handlers

use std::sync::LazyLock;

/// Front-end URL the OAuth callback redirects to with `?token=` or `?error=`
///
/// Default: "http://localhost:3000"
pub static INSTAGRAM_FRONTEND_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("FRONTEND_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| "http://localhost:3000".to_string())
});

/// Append query parameters to the front-end URL, keeping any query it already has
pub(crate) fn frontend_redirect(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
