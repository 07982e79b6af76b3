use crate::errors::AppError;
use crate::models::ProgressSummary;
use crate::schedule::{is_valid_day, TOTAL_DAYS};
use crate::storage::{KvStore, PROGRESS_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressState(BTreeMap<u8, bool>);

impl ProgressState {
    pub fn is_complete(&self, day: u8) -> bool {
        self.0.get(&day).copied().unwrap_or(false)
    }

    fn flip(&mut self, day: u8) -> bool {
        let flag = self.0.entry(day).or_insert(false);
        *flag = !*flag;
        *flag
    }

    // Accepts `"4"` and the older `"d4"` keys; unknown days are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut days = BTreeMap::new();
        for (key, flag) in object {
            let flag = flag.as_bool()?;
            let digits = key.strip_prefix('d').unwrap_or(key);
            match digits.parse::<u8>() {
                Ok(day) if is_valid_day(day) => {
                    days.insert(day, flag);
                }
                _ => debug!("dropping progress entry with key {key:?}"),
            }
        }
        Some(Self(days))
    }

    pub fn completed_count(&self) -> u8 {
        (1..=TOTAL_DAYS).filter(|day| self.is_complete(*day)).count() as u8
    }
}

#[derive(Debug, Default)]
pub struct ProgressStore {
    state: ProgressState,
}

impl ProgressStore {
    pub fn load(kv: &KvStore) -> Self {
        let Some(raw) = kv.get(PROGRESS_KEY) else {
            return Self::default();
        };

        let state = serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|value| ProgressState::from_value(&value));
        match state {
            Some(state) => Self { state },
            None => {
                warn!("stored progress is corrupt, starting from an empty plan");
                Self::default()
            }
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn is_complete(&self, day: u8) -> bool {
        self.state.is_complete(day)
    }

    pub async fn toggle(&mut self, kv: &mut KvStore, day: u8) -> Result<ProgressSummary, AppError> {
        if !is_valid_day(day) {
            return Err(AppError::bad_request(format!(
                "day must be between 1 and {TOTAL_DAYS}"
            )));
        }

        let mut next = self.state.clone();
        let complete = next.flip(day);
        persist(kv, &next).await?;
        self.state = next;
        debug!(day, complete, "toggled day");
        Ok(self.aggregate())
    }

    pub async fn replace(&mut self, kv: &mut KvStore, state: ProgressState) -> Result<(), AppError> {
        persist(kv, &state).await?;
        self.state = state;
        Ok(())
    }

    pub fn aggregate(&self) -> ProgressSummary {
        let completed_count = self.state.completed_count();
        let percent = (f64::from(completed_count) * 100.0 / f64::from(TOTAL_DAYS)).round() as u8;
        ProgressSummary {
            completed_count,
            total_count: TOTAL_DAYS,
            percent,
        }
    }
}

async fn persist(kv: &mut KvStore, state: &ProgressState) -> Result<(), AppError> {
    let payload = serde_json::to_string(state).map_err(AppError::internal)?;
    kv.set(PROGRESS_KEY, payload).await
}
