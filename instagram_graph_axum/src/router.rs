//! Router for the Instagram endpoints

use axum::Router;
use http::Request;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use instagram_graph::InstagramService;

/// Create the router for all Instagram endpoints
///
/// Mount it under [`INSTAGRAM_ROUTE_PREFIX`](crate::INSTAGRAM_ROUTE_PREFIX). The endpoints are:
/// - `GET  /login`, `GET /callback`, `POST /logout`
/// - `GET  /profile`, `GET /media`
/// - `GET  /media/{media_id}/comments`, `POST /media/{media_id}/comments`
/// - `POST /media/{media_id}/comments/reply`
///
/// Trace spans record the method and path only; headers carry access tokens and
/// the callback query carries the authorization code.
pub fn instagram_router(service: InstagramService) -> Router {
    instagram_router_no_trace(service).layer(
        TraceLayer::new_for_http()
            .make_span_with(PathOnlySpan)
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Request span without query string or headers
#[derive(Debug, Clone, Copy)]
struct PathOnlySpan;

impl<B> MakeSpan<B> for PathOnlySpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            version = ?request.version(),
        )
    }
}

/// Same as [`instagram_router`] without the HTTP tracing middleware
pub fn instagram_router_no_trace(service: InstagramService) -> Router {
    super::instagram::router().with_state(service)
}
