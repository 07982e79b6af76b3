use crate::annotations::AnnotationIndex;
use crate::backup::{self, BackupDocument, ImportError};
use crate::countdown::{Countdown, Tick};
use crate::errors::AppError;
use crate::models::{CountdownStatus, DayView, ProgressSummary, WeekView};
use crate::notifier::{Notifier, Toast};
use crate::progress::ProgressStore;
use crate::reminders::ReminderList;
use crate::schedule::WEEKS;
use crate::storage::{DARK_MODE_KEY, KvStore};
use chrono::NaiveTime;
use std::time::Instant;
use tracing::info;

pub struct Tracker {
    kv: KvStore,
    progress: ProgressStore,
    annotations: AnnotationIndex,
    reminders: ReminderList,
    notifier: Notifier,
    countdown: Countdown,
}

impl Tracker {
    pub fn new(kv: KvStore, annotations: AnnotationIndex, notifier: Notifier) -> Self {
        let progress = ProgressStore::load(&kv);
        let reminders = ReminderList::load(&kv);
        Self {
            kv,
            progress,
            annotations,
            reminders,
            notifier,
            countdown: Countdown::default(),
        }
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn annotations(&self) -> &AnnotationIndex {
        &self.annotations
    }

    pub fn week_views(&self) -> Vec<WeekView> {
        WEEKS
            .iter()
            .map(|week| WeekView {
                name: week.name,
                days: week
                    .days
                    .iter()
                    .map(|task| DayView {
                        day: task.day,
                        title: task.title,
                        category: task.category,
                        complete: self.progress.is_complete(task.day),
                        annotations: self.annotations.for_day(task.day).to_vec(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub async fn toggle_day(&mut self, day: u8) -> Result<ProgressSummary, AppError> {
        self.progress.toggle(&mut self.kv, day).await
    }

    pub fn export_backup(&self, timestamp: i64) -> BackupDocument {
        backup::export(self.progress.state(), &self.annotations, timestamp)
    }

    pub async fn import_backup(&mut self, raw: &str) -> Result<ProgressSummary, ImportError> {
        let validated = backup::parse(raw)?;
        self.progress
            .replace(&mut self.kv, validated.state)
            .await
            .map_err(|err| ImportError::Storage(err.message))?;
        if let Some(annotations) = validated.annotations {
            self.annotations = annotations;
        }
        info!("imported backup");
        Ok(self.progress.aggregate())
    }

    pub fn reminders(&self) -> &[String] {
        self.reminders.times()
    }

    pub async fn add_reminder(&mut self, time: &str) -> Result<(), AppError> {
        self.reminders.add(&mut self.kv, time).await
    }

    pub async fn remove_reminder(&mut self, index: usize) -> Result<String, AppError> {
        self.reminders.remove(&mut self.kv, index).await
    }

    pub fn check_reminders(&mut self, now: NaiveTime) -> usize {
        self.reminders.check_due(now, &mut self.notifier)
    }

    pub fn start_countdown(&mut self, duration_secs: u32) -> Option<u64> {
        self.countdown
            .start(duration_secs)
            .then(|| self.countdown.generation())
    }

    pub fn stop_countdown(&mut self) -> bool {
        self.countdown.stop()
    }

    pub fn tick_countdown(&mut self, generation: u64) -> Tick {
        if self.countdown.generation() != generation {
            return Tick::Idle;
        }
        self.countdown.tick(&mut self.notifier)
    }

    pub fn countdown_status(&self) -> CountdownStatus {
        self.countdown.status()
    }

    pub fn poll_countdown(&mut self) -> CountdownStatus {
        self.countdown.take_status()
    }

    pub fn toasts(&mut self) -> Vec<Toast> {
        self.notifier.active_toasts(Instant::now())
    }

    pub fn dark_mode(&self) -> bool {
        self.kv.get(DARK_MODE_KEY) == Some("1")
    }

    pub async fn toggle_dark_mode(&mut self) -> Result<bool, AppError> {
        let dark = !self.dark_mode();
        let flag = if dark { "1" } else { "0" };
        self.kv.set(DARK_MODE_KEY, flag.to_string()).await?;
        Ok(dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::testing::RecordingSink;

    fn tracker() -> Tracker {
        let annotations =
            AnnotationIndex::from_resource(br#"{"days": {"2": {"vivitsu": ["Variance sum"]}}}"#)
                .unwrap();
        Tracker::new(
            KvStore::in_memory(),
            annotations,
            Notifier::new(Box::new(RecordingSink::default())),
        )
    }

    #[tokio::test]
    async fn export_then_import_restores_everything() {
        let mut tracker = tracker();
        tracker.toggle_day(2).await.unwrap();
        tracker.toggle_day(17).await.unwrap();

        let document = tracker.export_backup(1_700_000_000_000);
        let raw = serde_json::to_string(&document).unwrap();
        let summary = tracker.import_backup(&raw).await.unwrap();

        assert_eq!(summary.completed_count, 2);
        assert_eq!(tracker.progress().state(), &document.state);
        assert_eq!(tracker.annotations(), &document.annotations);
    }

    #[tokio::test]
    async fn rejected_import_leaves_state_untouched() {
        let mut tracker = tracker();
        tracker.toggle_day(5).await.unwrap();
        let before = tracker.progress().state().clone();
        let annotations_before = tracker.annotations().clone();

        assert_eq!(
            tracker.import_backup("{not json").await,
            Err(ImportError::InvalidJson)
        );
        assert_eq!(
            tracker.import_backup(r#"{"foo": 1}"#).await,
            Err(ImportError::InvalidShape)
        );
        assert_eq!(tracker.progress().state(), &before);
        assert_eq!(tracker.annotations(), &annotations_before);
    }

    #[tokio::test]
    async fn import_that_cannot_be_saved_changes_nothing() {
        let path = std::env::temp_dir()
            .join("study_tracker_missing_dir")
            .join("state.json");
        let annotations =
            AnnotationIndex::from_resource(br#"{"days": {"2": {"vivitsu": ["Variance sum"]}}}"#)
                .unwrap();
        let mut tracker = Tracker::new(
            KvStore::open(&path).await,
            annotations.clone(),
            Notifier::new(Box::new(RecordingSink::default())),
        );

        let result = tracker
            .import_backup(r#"{"state": {"7": true}, "annotations": {"2": ["new"]}}"#)
            .await;

        assert!(matches!(result, Err(ImportError::Storage(_))));
        assert!(!tracker.progress().is_complete(7));
        assert_eq!(tracker.annotations(), &annotations);
    }

    #[tokio::test]
    async fn import_without_annotations_keeps_index() {
        let mut tracker = tracker();
        tracker.import_backup(r#"{"state": {"30": true}}"#).await.unwrap();

        assert!(tracker.progress().is_complete(30));
        assert_eq!(tracker.annotations().for_day(2), ["Variance sum"]);
    }

    #[tokio::test]
    async fn week_views_reflect_progress_and_annotations() {
        let mut tracker = tracker();
        tracker.toggle_day(2).await.unwrap();

        let weeks = tracker.week_views();
        assert_eq!(weeks.len(), 5);
        let day_two = &weeks[0].days[1];
        assert!(day_two.complete);
        assert_eq!(day_two.annotations, vec!["Variance sum".to_string()]);
    }

    #[tokio::test]
    async fn dark_mode_flag_toggles() {
        let mut tracker = tracker();
        assert!(!tracker.dark_mode());
        assert!(tracker.toggle_dark_mode().await.unwrap());
        assert!(tracker.dark_mode());
        assert!(!tracker.toggle_dark_mode().await.unwrap());
    }

    #[test]
    fn stale_countdown_generation_does_not_tick() {
        let mut tracker = tracker();
        let first = tracker.start_countdown(60).unwrap();
        tracker.stop_countdown();
        let second = tracker.start_countdown(60).unwrap();

        assert_eq!(tracker.tick_countdown(first), Tick::Idle);
        assert_eq!(tracker.tick_countdown(second), Tick::Running(59));
    }
}
