use crate::models::CountdownStatus;
use crate::notifier::Notifier;
use std::time::Duration;
use tracing::info;

pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_MINUTES: u32 = 25;
pub const FINISHED_MESSAGE: &str = "Pomodoro finished";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Idle,
    Running(u32),
    Finished,
}

#[derive(Debug, Default)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    generation: u64,
    chime: bool,
}

impl Countdown {
    pub fn start(&mut self, duration_secs: u32) -> bool {
        if self.running {
            return false;
        }
        self.remaining = duration_secs;
        self.running = true;
        self.chime = false;
        self.generation += 1;
        info!(duration_secs, "countdown started");
        true
    }

    pub fn tick(&mut self, notifier: &mut Notifier) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Tick::Running(self.remaining);
        }

        self.stop();
        notifier.notify(FINISHED_MESSAGE);
        Tick::Finished
    }

    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.chime = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> CountdownStatus {
        CountdownStatus {
            running: self.running,
            remaining_secs: self.remaining,
            chime: self.chime,
        }
    }

    pub fn take_status(&mut self) -> CountdownStatus {
        let status = self.status();
        self.chime = false;
        status
    }
}
