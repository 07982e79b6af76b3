use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/days/:day/toggle", post(handlers::toggle_day_form))
        .route("/api/schedule", get(handlers::get_schedule))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/days/:day/toggle", post(handlers::toggle_day))
        .route("/api/days/:day/annotations", get(handlers::get_day_annotations))
        .route(
            "/api/backup",
            get(handlers::export_backup).post(handlers::import_backup),
        )
        .route(
            "/api/reminders",
            get(handlers::list_reminders).post(handlers::add_reminder),
        )
        .route("/api/reminders/:index", delete(handlers::remove_reminder))
        .route("/api/focus", post(handlers::focus))
        .route("/api/toasts", get(handlers::get_toasts))
        .route("/api/countdown", get(handlers::get_countdown))
        .route("/api/countdown/start", post(handlers::start_countdown))
        .route("/api/countdown/stop", post(handlers::stop_countdown))
        .route("/api/dark-mode", post(handlers::toggle_dark_mode))
        .with_state(state)
}
