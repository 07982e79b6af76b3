use crate::notifier::Permission;
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub annotations_path: PathBuf,
    pub notifications: Permission,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = env::var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/state.json"));

        let annotations_path = env::var("ANNOTATIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/tasks.json"));

        let notifications = env::var("STUDY_NOTIFICATIONS")
            .map(|value| Permission::parse(&value))
            .unwrap_or_default();

        Self {
            port,
            data_path,
            annotations_path,
            notifications,
        }
    }
}
