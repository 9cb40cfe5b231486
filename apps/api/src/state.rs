use docwatch_application::ObjectNotificationService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub object_notification_service: ObjectNotificationService,
    pub push_verification_token: Option<String>,
}
