//! Bearer token authentication for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::handlers::AppState;
use crate::error::{AppError, Result};

/// Verifies the `Authorization: Bearer <token>` header and stores the
/// claims in the request extensions for the handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

    let claims = state.service.auth().verify(token.trim()).map_err(|e| {
        debug!(error = %e, "rejected session token");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
