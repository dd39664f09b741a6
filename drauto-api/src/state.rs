use std::sync::Arc;

use drauto_core::repository::{BookingRepository, ServiceRepository};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub session_ttl_seconds: u64,
    /// Switches the session cookie to its cross-site attributes.
    pub production: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub auth: AuthConfig,
}
