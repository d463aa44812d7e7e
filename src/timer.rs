/// Countdown for one round. The engine holds the state; the embedding event
/// loop delivers one `tick` per second while a round is on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTimer {
    remaining: u32,
    running: bool,
}

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerTick {
    /// Not running, nothing happened.
    Idle,
    /// One second elapsed, this much is left.
    Running(u32),
    /// The countdown just hit zero and stopped.
    Expired,
}

impl RoundTimer {
    pub const fn new(limit: u32) -> Self {
        Self {
            remaining: limit,
            running: false,
        }
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the countdown, keeps counting if already running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halts the countdown. The remaining time stays as it is.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining)
        }
    }
}
