use std::time::{Duration, Instant};

use crate::session::Generation;

/// Identifies one question of one quiz run.
pub type QuestionKey = (Generation, usize);

/// Per-question countdown. Restarts whenever the tracked question changes
/// and reports expiry once per question.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    current: Option<QuestionKey>,
    deadline: Option<Instant>,
    fired: bool,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
            deadline: None,
            fired: false,
        }
    }

    pub fn track(&mut self, key: QuestionKey, now: Instant) {
        if self.current != Some(key) {
            self.current = Some(key);
            self.deadline = now.checked_add(self.duration);
            self.fired = false;
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.deadline = None;
        self.fired = false;
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// True exactly once, the first time it is polled at or past the deadline.
    pub fn poll_expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if !self.fired && now >= deadline => {
                self.fired = true;
                true
            }
            _ => false,
        }
    }
}

/// Whole seconds left, rounded up so the display reads 30 at the start.
pub fn seconds_left(remaining: Duration) -> u64 {
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// `mm:ss`
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
