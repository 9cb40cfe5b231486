use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState) -> Router {
    let push_routes = Router::new()
        .route("/pubsub/push", post(handlers::push::push_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_push_token,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(push_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
