use crate::errors::AppError;
use crate::notifier::Notifier;
use crate::storage::{KvStore, REMINDERS_KEY};
use chrono::NaiveTime;
use std::time::Duration;
use tracing::{info, warn};

pub const REMINDER_TICK: Duration = Duration::from_secs(60);

pub fn reminder_message(time: &str) -> String {
    format!("Reminder: Study for CA Inter — {time}")
}

#[derive(Debug, Clone, Default)]
pub struct ReminderList {
    times: Vec<String>,
}

impl ReminderList {
    pub fn load(kv: &KvStore) -> Self {
        let Some(raw) = kv.get(REMINDERS_KEY) else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(times) => Self { times },
            Err(err) => {
                warn!("stored reminders are corrupt, starting empty: {err}");
                Self::default()
            }
        }
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    // Only emptiness is checked; a malformed time is stored and never matches.
    pub async fn add(&mut self, kv: &mut KvStore, time: &str) -> Result<(), AppError> {
        if time.is_empty() {
            return Err(AppError::bad_request("reminder time must not be empty"));
        }
        let mut next = self.times.clone();
        next.push(time.to_string());
        persist(kv, &next).await?;
        self.times = next;
        info!("reminder added: {time}");
        Ok(())
    }

    pub async fn remove(&mut self, kv: &mut KvStore, index: usize) -> Result<String, AppError> {
        if index >= self.times.len() {
            return Err(AppError::not_found(format!("no reminder at position {index}")));
        }
        let mut next = self.times.clone();
        let removed = next.remove(index);
        persist(kv, &next).await?;
        self.times = next;
        Ok(removed)
    }

    // Level triggered: a second check in the same minute fires again.
    pub fn check_due(&self, now: NaiveTime, notifier: &mut Notifier) -> usize {
        let current = now.format("%H:%M").to_string();
        let mut fired = 0;
        for time in self.times.iter().filter(|time| **time == current) {
            notifier.notify(&reminder_message(time));
            fired += 1;
        }
        fired
    }
}

async fn persist(kv: &mut KvStore, times: &[String]) -> Result<(), AppError> {
    let payload = serde_json::to_string(times).map_err(AppError::internal)?;
    kv.set(REMINDERS_KEY, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::testing::RecordingSink;
    use crate::notifier::Permission;

    fn recording_notifier() -> (Notifier, RecordingSink) {
        let sink = RecordingSink::default();
        let mut notifier = Notifier::new(Box::new(sink.clone()));
        notifier.request_permission(Permission::Granted);
        (notifier, sink)
    }

    fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[tokio::test]
    async fn matching_minute_fires_once_per_check() {
        let mut kv = KvStore::in_memory();
        let mut reminders = ReminderList::load(&kv);
        reminders.add(&mut kv, "19:00").await.unwrap();
        let (mut notifier, sink) = recording_notifier();

        assert_eq!(reminders.check_due(at(19, 0, 5), &mut notifier), 1);
        assert_eq!(*sink.shown.lock().unwrap(), vec![reminder_message("19:00")]);

        // A second check within the same minute fires again.
        assert_eq!(reminders.check_due(at(19, 0, 40), &mut notifier), 1);
        assert_eq!(sink.shown.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn other_minutes_do_not_fire() {
        let mut kv = KvStore::in_memory();
        let mut reminders = ReminderList::load(&kv);
        reminders.add(&mut kv, "07:05").await.unwrap();
        reminders.add(&mut kv, "7:5").await.unwrap();
        let (mut notifier, sink) = recording_notifier();

        assert_eq!(reminders.check_due(at(7, 6, 0), &mut notifier), 0);
        assert_eq!(reminders.check_due(at(7, 5, 0), &mut notifier), 1);
        assert_eq!(sink.shown.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicates_fire_twice() {
        let mut kv = KvStore::in_memory();
        let mut reminders = ReminderList::load(&kv);
        reminders.add(&mut kv, "06:30").await.unwrap();
        reminders.add(&mut kv, "06:30").await.unwrap();
        let (mut notifier, _sink) = recording_notifier();

        assert_eq!(reminders.check_due(at(6, 30, 0), &mut notifier), 2);
    }

    #[tokio::test]
    async fn reminders_persist_and_reload() {
        let mut kv = KvStore::in_memory();
        let mut reminders = ReminderList::load(&kv);
        reminders.add(&mut kv, "08:00").await.unwrap();
        reminders.add(&mut kv, "21:15").await.unwrap();
        assert_eq!(reminders.remove(&mut kv, 0).await.unwrap(), "08:00");

        let reloaded = ReminderList::load(&kv);
        assert_eq!(reloaded.times(), ["21:15"]);
    }

    #[tokio::test]
    async fn empty_time_is_rejected() {
        let mut kv = KvStore::in_memory();
        let mut reminders = ReminderList::load(&kv);
        assert!(reminders.add(&mut kv, "").await.is_err());
        assert!(reminders.remove(&mut kv, 3).await.is_err());
        assert!(reminders.times().is_empty());
    }
}
