use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::AuthConfig;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Claims inside a session token: the expiry plus whatever identity map
/// the client submitted at issuance. Nothing is checked against a user
/// store; the signature alone makes the claims trusted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub exp: usize,
    #[serde(flatten)]
    pub identity: Map<String, Value>,
}

impl SessionClaims {
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }
}

/// Signs the submitted identity under the server secret. Reserved JWT
/// keys in the map are dropped; the issuer owns the expiry.
pub fn mint_session_token(
    identity: &Map<String, Value>,
    auth: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut identity = identity.clone();
    for reserved in ["exp", "iat", "nbf"] {
        identity.remove(reserved);
    }

    let claims = SessionClaims {
        exp: (Utc::now() + Duration::seconds(auth.session_ttl_seconds as i64)).timestamp()
            as usize,
        identity,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
}

/// Checks signature and expiry; any failure means the request carries no
/// usable session.
pub fn verify_session_token(
    token: &str,
    auth: &AuthConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

fn base_cookie(value: String, auth: &AuthConfig) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    if auth.production {
        // Cross-site frontends need Secure + SameSite=None
        cookie.set_secure(true);
        cookie.set_same_site(SameSite::None);
    } else {
        cookie.set_secure(false);
        cookie.set_same_site(SameSite::Strict);
    }
    cookie
}

/// Cookie carrying a freshly minted token. No Max-Age; the token's own
/// expiry bounds the session.
pub fn session_cookie(token: String, auth: &AuthConfig) -> Cookie<'static> {
    base_cookie(token, auth)
}

/// Removal cookie with the same attributes as the issued one and zero
/// lifetime. Tokens already handed out stay valid until they expire.
pub fn removal_cookie(auth: &AuthConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), auth);
    cookie.make_removal();
    cookie
}
