pub mod annotations;
pub mod app;
pub mod backup;
pub mod config;
pub mod countdown;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod progress;
pub mod reminders;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod ticker;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use tracker::Tracker;
