use std::net::SocketAddr;
use std::sync::Arc;

use drauto_api::{app, cors_layer, state::{AppState, AuthConfig}};
use drauto_store::{DbClient, PgBookingRepository, PgServiceRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drauto_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = drauto_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Dr.Auto API on port {}", config.server.port);

    // The pool is lazy; an unreachable store is logged, not fatal
    let db = DbClient::connect_lazy(&config.database.url).expect("Invalid database URL");
    match db.ping().await {
        Ok(()) => {
            if let Err(e) = db.migrate().await {
                tracing::error!("Database migration failed: {}", e);
            }
        }
        Err(e) => {
            tracing::error!("Database unreachable at startup, continuing anyway: {}", e);
        }
    }

    let app_state = AppState {
        services: Arc::new(PgServiceRepository::new(db.pool.clone())),
        bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            session_ttl_seconds: config.auth.session_ttl_seconds,
            production: config.is_production(),
        },
    };

    let app = app(app_state, cors_layer(&config.cors.allowed_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
