use crate::annotations::AnnotationIndex;
use crate::progress::ProgressState;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const BACKUP_VERSION: &str = "ca-inter-tracker-v2";
pub const BACKUP_FILENAME: &str = "ca-inter-backup.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Invalid backup file")]
    InvalidShape,
    #[error("failed to save imported backup: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupDocument {
    pub version: String,
    pub state: ProgressState,
    pub timestamp: i64,
    pub annotations: AnnotationIndex,
}

#[derive(Debug, PartialEq)]
pub struct ValidatedBackup {
    pub state: ProgressState,
    pub annotations: Option<AnnotationIndex>,
}

pub fn export(state: &ProgressState, annotations: &AnnotationIndex, timestamp: i64) -> BackupDocument {
    BackupDocument {
        version: BACKUP_VERSION.to_string(),
        state: state.clone(),
        timestamp,
        annotations: annotations.clone(),
    }
}

pub fn parse(raw: &str) -> Result<ValidatedBackup, ImportError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| ImportError::InvalidJson)?;
    let object = value.as_object().ok_or(ImportError::InvalidShape)?;

    let state = object
        .get("state")
        .and_then(ProgressState::from_value)
        .ok_or(ImportError::InvalidShape)?;

    let annotations = match object.get("annotations").or_else(|| object.get("vivitsu")) {
        None | Some(Value::Null) => None,
        Some(value) => {
            Some(AnnotationIndex::deserialize(value).map_err(|_| ImportError::InvalidShape)?)
        }
    };

    Ok(ValidatedBackup { state, annotations })
}
