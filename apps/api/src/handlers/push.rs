use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use tracing::{info, warn};

use crate::dto::PushAcceptedResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn push_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<PushAcceptedResponse>> {
    let notice = state
        .object_notification_service
        .handle_push(&body)
        .await
        .inspect_err(|error| {
            warn!(error = %error, "push delivery rejected");
        })?;

    info!(
        message_id = %notice.message_id,
        bucket = notice.identity.bucket(),
        key = notice.identity.key(),
        "push delivery accepted"
    );

    Ok(Json(PushAcceptedResponse::from(notice)))
}
