use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use docwatch_core::AppError;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PushTokenQuery {
    pub token: Option<String>,
}

/// Rejects push deliveries whose `token` query parameter does not match the
/// configured verification token. Passes everything when none is configured.
pub async fn require_push_token(
    State(state): State<AppState>,
    Query(query): Query<PushTokenQuery>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if let Some(expected) = state.push_verification_token.as_deref()
        && query.token.as_deref() != Some(expected)
    {
        return Err(AppError::Unauthorized("invalid push verification token".to_owned()).into());
    }

    Ok(next.run(request).await)
}
