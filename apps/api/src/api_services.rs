use docwatch_application::ObjectNotificationService;
use docwatch_core::AppError;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    Ok(AppState {
        object_notification_service: ObjectNotificationService::new(config.object_sink.build()?),
        push_verification_token: config.push_verification_token.clone(),
    })
}
