pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers as feedback;
use crate::interviews::handlers as interviews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Feedback API
        .route(
            "/api/v1/feedback",
            post(feedback::handle_create_feedback).get(feedback::handle_get_feedback),
        )
        // Interview query API
        .route(
            "/api/v1/interviews",
            get(interviews::handle_get_user_interviews),
        )
        .route(
            "/api/v1/interviews/latest",
            get(interviews::handle_get_latest_interviews),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_get_interview),
        )
        .with_state(state)
}
