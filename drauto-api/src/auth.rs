use axum::{
    extract::State,
    Json,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{error::AppError, session, state::AppState};

#[derive(Debug, Serialize)]
struct AuthAck {
    success: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
}

/// POST /jwt
/// Signs whatever identity the client submits and delivers it as the
/// session cookie. The token never appears in the response body.
async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<AuthAck>), AppError> {
    let token = session::mint_session_token(&identity, &state.auth)
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    let jar = jar.add(session::session_cookie(token, &state.auth));
    Ok((jar, Json(AuthAck { success: true })))
}

/// POST /logout
/// Clears the client's cookie copy. Already-issued tokens stay valid
/// until their expiry; there is no server-side revocation.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<AuthAck>) {
    let jar = jar.add(session::removal_cookie(&state.auth));
    (jar, Json(AuthAck { success: true }))
}
