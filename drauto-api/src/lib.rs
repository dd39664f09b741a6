use axum::{http::Method, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod bookings;
pub mod error;
pub mod middleware;
pub mod services;
pub mod session;
pub mod state;

pub use state::AppState;

/// Assembles the full router over injected repositories.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(liveness))
        .merge(auth::routes())
        .merge(services::routes())
        .merge(bookings::routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS over the configured origin allow-list. Origins that
/// fail to parse are skipped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unparseable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn liveness() -> &'static str {
    "server is running"
}
