use axum::{Router, routing::get};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instagram_graph_axum::{
    INSTAGRAM_ROUTE_PREFIX, InstagramConfig, InstagramService, instagram_router,
};

mod handlers;
mod server;

use crate::{handlers::health, server::spawn_http_server};

fn app(service: InstagramService) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(INSTAGRAM_ROUTE_PREFIX.as_str(), instagram_router(service))
        .layer(CorsLayer::permissive())
}

fn port_from_env() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(3000)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,instagram_graph=debug,instagram_graph_axum=debug,tower_http=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials are reported at token exchange, not here
    let config = InstagramConfig::from_env()?;
    let service = InstagramService::new(config)?;

    let port = port_from_env();
    tracing::info!(
        "Instagram routes mounted at {}",
        INSTAGRAM_ROUTE_PREFIX.as_str()
    );

    spawn_http_server(port, app(service)).await??;
    Ok(())
}
