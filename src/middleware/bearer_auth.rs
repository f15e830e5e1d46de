//! Bearer token verification for protected routes.
//!
//! Responsibility:
//! - Extract `Authorization: Bearer <token>` from the request
//! - Verify it and put the resulting [`Principal`] into request extensions
//! - Reject with a bare 401 on any failure; which check failed is logged,
//!   never returned to the client

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Middleware for routes that require a verified token.
///
/// Wire it with `middleware::from_fn_with_state`; axum 0.8's plain `from_fn`
/// cannot take a `State` extractor:
///
/// ```ignore
/// router.route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
/// ```
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let principal = match state.verifier.verify(token) {
        Ok(principal) => principal,
        Err(err) => {
            tracing::warn!(error = ?err, "token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    // middleware -> extractor handoff
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
