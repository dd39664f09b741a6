use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::session::{self, SESSION_COOKIE};
use crate::state::AppState;

// ============================================================================
// Session Guard Middleware
// ============================================================================

/// Guards identity-scoped routes. A missing, expired or otherwise invalid
/// session cookie ends the request with 401 before the handler runs; a
/// valid one puts the verified claims into the request extensions.
pub async fn session_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from the session cookie; the request body is never read
    let jar = CookieJar::from_headers(req.headers());
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or_else(|| AppError::AuthenticationError("Unauthorized".to_string()))?;

    // 2. Decode and validate the token
    let claims = session::verify_session_token(&token, &state.auth)
        .map_err(|_| AppError::AuthenticationError("Unauthorized".to_string()))?;

    // 3. Inject claims into request extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
