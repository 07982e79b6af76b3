use crate::backup::BACKUP_FILENAME;
use crate::countdown::DEFAULT_MINUTES;
use crate::errors::AppError;
use crate::models::{
    AnnotationsResponse, CountdownRequest, CountdownStatus, DarkModeResponse, FocusResponse,
    ImportResponse, PageQuery, ProgressSummary, ReminderRequest, RemindersResponse,
    ScheduleResponse, ToastsResponse, ToggleResponse,
};
use crate::schedule::{is_valid_day, TOTAL_DAYS, WEEKS};
use crate::state::AppState;
use crate::ticker::spawn_countdown_ticker;
use crate::ui::{render_index, PageView};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use chrono::{Local, Utc};
use tracing::info;

pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let active_week = query.week.filter(|week| *week < WEEKS.len()).unwrap_or(0);
    let tracker = state.tracker.lock().await;
    let view = PageView {
        weeks: tracker.week_views(),
        active_week,
        progress: tracker.progress().aggregate(),
        dark: tracker.dark_mode(),
    };
    Html(render_index(&view))
}

pub async fn get_schedule(State(state): State<AppState>) -> Json<ScheduleResponse> {
    let tracker = state.tracker.lock().await;
    Json(ScheduleResponse {
        weeks: tracker.week_views(),
        progress: tracker.progress().aggregate(),
    })
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressSummary> {
    let tracker = state.tracker.lock().await;
    Json(tracker.progress().aggregate())
}

pub async fn toggle_day(
    State(state): State<AppState>,
    Path(day): Path<u8>,
) -> Result<Json<ToggleResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let progress = tracker.toggle_day(day).await?;
    Ok(Json(ToggleResponse {
        day,
        complete: tracker.progress().is_complete(day),
        progress,
    }))
}

pub async fn toggle_day_form(
    State(state): State<AppState>,
    Path(day): Path<u8>,
) -> Result<Redirect, AppError> {
    state.tracker.lock().await.toggle_day(day).await?;
    let week = WEEKS
        .iter()
        .position(|week| week.days.iter().any(|task| task.day == day))
        .unwrap_or(0);
    Ok(Redirect::to(&format!("/?week={week}")))
}

pub async fn get_day_annotations(
    State(state): State<AppState>,
    Path(day): Path<u8>,
) -> Result<Json<AnnotationsResponse>, AppError> {
    if !is_valid_day(day) {
        return Err(AppError::bad_request(format!(
            "day must be between 1 and {TOTAL_DAYS}"
        )));
    }
    let tracker = state.tracker.lock().await;
    Ok(Json(AnnotationsResponse {
        day,
        items: tracker.annotations().for_day(day).to_vec(),
    }))
}

pub async fn export_backup(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let document = state
        .tracker
        .lock()
        .await
        .export_backup(Utc::now().timestamp_millis());
    let body = serde_json::to_string_pretty(&document).map_err(AppError::internal)?;
    info!("exported backup");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{BACKUP_FILENAME}\""),
            ),
        ],
        body,
    ))
}

pub async fn import_backup(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let progress = state.tracker.lock().await.import_backup(&body).await?;
    Ok(Json(ImportResponse {
        message: "Imported backup".to_string(),
        progress,
    }))
}

pub async fn list_reminders(State(state): State<AppState>) -> Json<RemindersResponse> {
    let tracker = state.tracker.lock().await;
    Json(RemindersResponse {
        reminders: tracker.reminders().to_vec(),
    })
}

pub async fn add_reminder(
    State(state): State<AppState>,
    Json(payload): Json<ReminderRequest>,
) -> Result<Json<RemindersResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.add_reminder(&payload.time).await?;
    Ok(Json(RemindersResponse {
        reminders: tracker.reminders().to_vec(),
    }))
}

pub async fn remove_reminder(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<RemindersResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.remove_reminder(index).await?;
    Ok(Json(RemindersResponse {
        reminders: tracker.reminders().to_vec(),
    }))
}

pub async fn focus(State(state): State<AppState>) -> Json<FocusResponse> {
    let fired = state
        .tracker
        .lock()
        .await
        .check_reminders(Local::now().time());
    Json(FocusResponse { fired })
}

pub async fn get_toasts(State(state): State<AppState>) -> Json<ToastsResponse> {
    let toasts = state.tracker.lock().await.toasts();
    Json(ToastsResponse { toasts })
}

pub async fn get_countdown(State(state): State<AppState>) -> Json<CountdownStatus> {
    Json(state.tracker.lock().await.poll_countdown())
}

pub async fn start_countdown(
    State(state): State<AppState>,
    Json(payload): Json<CountdownRequest>,
) -> Json<CountdownStatus> {
    let minutes = payload.minutes.unwrap_or(DEFAULT_MINUTES).max(1);
    let mut tracker = state.tracker.lock().await;
    if let Some(generation) = tracker.start_countdown(minutes.saturating_mul(60)) {
        spawn_countdown_ticker(state.clone(), generation);
    }
    Json(tracker.countdown_status())
}

pub async fn stop_countdown(State(state): State<AppState>) -> Json<CountdownStatus> {
    let mut tracker = state.tracker.lock().await;
    tracker.stop_countdown();
    Json(tracker.countdown_status())
}

pub async fn toggle_dark_mode(
    State(state): State<AppState>,
) -> Result<Json<DarkModeResponse>, AppError> {
    let dark = state.tracker.lock().await.toggle_dark_mode().await?;
    Ok(Json(DarkModeResponse { dark }))
}
