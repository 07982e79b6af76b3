use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const APP_NAME: &str = "CA Inter Tracker";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Default,
    Granted,
    Denied,
}

impl Permission {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Default,
        }
    }
}

pub trait SystemSink: Send + Sync {
    fn show(&self, message: &str) -> Result<(), String>;
}

pub struct DesktopSink;

// The D-Bus round trip blocks, so inside the runtime it runs on the blocking
// pool and a failure there is only logged.
impl SystemSink for DesktopSink {
    fn show(&self, message: &str) -> Result<(), String> {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return show_desktop(message);
        };
        let message = message.to_string();
        handle.spawn_blocking(move || {
            if let Err(err) = show_desktop(&message) {
                warn!("system notification failed: {err}");
            }
        });
        Ok(())
    }
}

fn show_desktop(message: &str) -> Result<(), String> {
    notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary(APP_NAME)
        .body(message)
        .show()
        .map(|_| ())
        .map_err(|err| err.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    #[serde(skip)]
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    System,
    Toast(u64),
}

pub struct Notifier {
    permission: Permission,
    sink: Box<dyn SystemSink>,
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Notifier {
    pub fn new(sink: Box<dyn SystemSink>) -> Self {
        Self {
            permission: Permission::Default,
            sink,
            toasts: Vec::new(),
            next_id: 1,
        }
    }

    pub fn desktop() -> Self {
        Self::new(Box::new(DesktopSink))
    }

    pub fn request_permission(&mut self, configured: Permission) -> Permission {
        self.permission = configured;
        info!(permission = ?configured, "notification permission");
        configured
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn notify(&mut self, message: &str) -> Delivery {
        self.notify_at(message, Instant::now())
    }

    pub fn notify_at(&mut self, message: &str, now: Instant) -> Delivery {
        self.prune(now);
        if self.permission == Permission::Granted {
            match self.sink.show(message) {
                Ok(()) => return Delivery::System,
                Err(err) => warn!("system notification failed, showing toast: {err}"),
            }
        }

        info!("notify: {message}");
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.to_string(),
            created_at: now,
        });
        Delivery::Toast(id)
    }

    pub fn active_toasts(&mut self, now: Instant) -> Vec<Toast> {
        self.prune(now);
        self.toasts.clone()
    }

    fn prune(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created_at) < TOAST_LIFETIME);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::SystemSink;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub struct RecordingSink {
        pub shown: Arc<Mutex<Vec<String>>>,
        pub fail: bool,
    }

    impl SystemSink for RecordingSink {
        fn show(&self, message: &str) -> Result<(), String> {
            if self.fail {
                return Err("no notification daemon".to_string());
            }
            self.shown.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }
}
