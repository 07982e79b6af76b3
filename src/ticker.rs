use crate::countdown::{COUNTDOWN_TICK, Tick};
use crate::reminders::REMINDER_TICK;
use crate::state::AppState;
use chrono::Local;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

pub fn spawn_reminder_ticker(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + REMINDER_TICK, REMINDER_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let mut tracker = state.tracker.lock().await;
            let fired = tracker.check_reminders(Local::now().time());
            if fired > 0 {
                info!(fired, "reminders due");
            }
        }
    })
}

pub fn spawn_countdown_ticker(state: AppState, generation: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + COUNTDOWN_TICK, COUNTDOWN_TICK);
        loop {
            ticker.tick().await;
            let mut tracker = state.tracker.lock().await;
            match tracker.tick_countdown(generation) {
                Tick::Running(_) => continue,
                Tick::Finished => {
                    info!("countdown finished");
                    break;
                }
                Tick::Idle => {
                    debug!(generation, "countdown ticker exiting");
                    break;
                }
            }
        }
    })
}
