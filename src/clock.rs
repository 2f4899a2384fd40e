use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Elapsed-time counter owned by a [`Game`](crate::Game).
///
/// Starts at most once per session, stops idempotently, and only ever
/// exposes a whole-second reading. Observers polling once a second see the
/// counter tick by one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    /// Starts the clock. A clock that has already started keeps its
    /// original start instant.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            let now = Utc::now();
            log::debug!("clock started at {now}");
            self.started_at = Some(now);
        }
    }

    /// Stops the clock. Safe to call on a stopped or never-started clock.
    pub fn stop(&mut self) {
        if self.is_running() {
            let now = Utc::now();
            log::debug!("clock stopped at {now}");
            self.ended_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.ended_at = None;
    }

    /// Whole seconds on the clock, 0 if it has not started.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_clock_reads_zero() {
        let clock = GameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_secs(), 0);
    }

    #[test]
    fn start_is_guarded_against_restart() {
        let mut clock = GameClock::new();
        clock.start();
        let started_at = clock.started_at;
        clock.start();
        assert_eq!(clock.started_at, started_at);
        assert!(clock.is_running());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut clock = GameClock::new();
        clock.stop();
        assert!(!clock.is_running());

        clock.start();
        clock.stop();
        let ended_at = clock.ended_at;
        clock.stop();
        assert_eq!(clock.ended_at, ended_at);
        assert_eq!(clock.elapsed_secs(), 0);
    }

    #[test]
    fn reset_clears_the_clock() {
        let mut clock = GameClock::new();
        clock.start();
        clock.stop();
        clock.reset();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_secs(), 0);
    }
}
