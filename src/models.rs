use crate::notifier::Toast;
use crate::schedule::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed_count: u8,
    pub total_count: u8,
    pub percent: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub day: u8,
    pub complete: bool,
    pub progress: ProgressSummary,
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub day: u8,
    pub title: &'static str,
    pub category: Category,
    pub complete: bool,
    pub annotations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub name: &'static str,
    pub days: Vec<DayView>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub weeks: Vec<WeekView>,
    pub progress: ProgressSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotationsResponse {
    pub day: u8,
    pub items: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub message: String,
    pub progress: ProgressSummary,
}

#[derive(Debug, Deserialize)]
pub struct ReminderRequest {
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemindersResponse {
    pub reminders: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FocusResponse {
    pub fired: usize,
}

#[derive(Debug, Deserialize)]
pub struct CountdownRequest {
    pub minutes: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownStatus {
    pub running: bool,
    pub remaining_secs: u32,
    pub chime: bool,
}

#[derive(Debug, Serialize)]
pub struct ToastsResponse {
    pub toasts: Vec<Toast>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DarkModeResponse {
    pub dark: bool,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub week: Option<usize>,
}
