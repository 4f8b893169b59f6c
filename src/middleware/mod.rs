//! Middleware for Roombook.
//!
//! Bearer-token authentication and admin gating. The token's subject is
//! the user id; the user row is re-read on every request, so disabling an
//! account cuts off its tokens immediately.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{db, error::Error, AppState};

/// User context injected into request extensions after successful
/// authentication.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    /// "admin" or "member"
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Middleware that requires a valid bearer token.
///
/// Extracts the JWT from the Authorization header, validates it, loads
/// the user, and injects [`AuthUser`] into request extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if the header is missing or malformed, the
/// token fails validation, or the user no longer exists; 403 Forbidden
/// for disabled accounts.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(Error::Unauthenticated)?;

    let claims = state.auth.verify_token(token)?;

    // The account may have been edited or deleted since the token was
    // issued; the database row is authoritative.
    let user = db::get_user(&state.db, &claims.sub)
        .await
        .map_err(|_| Error::InvalidToken)?;

    if !user.enabled {
        return Err(Error::Forbidden);
    }

    req.extensions_mut().insert(AuthUser {
        user_id: user.id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires admin role.
///
/// Must be used AFTER `require_auth`.
pub async fn require_admin(
    Extension(user): Extension<AuthUser>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    if !user.is_admin() {
        return Err(Error::Forbidden);
    }

    Ok(next.run(req).await)
}
