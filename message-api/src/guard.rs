use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use message_core::AuthError;

use crate::error::ApiError;
use crate::state::AppState;

pub static X_API_KEY: &str = "x-api-key";

/// Runs the access gate before any extractor of the guarded routes, so a
/// bad key wins over a bad body.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match req.headers().get(X_API_KEY).map(|v| v.to_str()) {
        None => state.gate.authorize(None)?,
        // A non-UTF-8 header cannot equal the configured key.
        Some(Err(_)) => return Err(AuthError::InvalidCredential.into()),
        Some(Ok(key)) => state.gate.authorize(Some(key))?,
    }
    Ok(next.run(req).await)
}
