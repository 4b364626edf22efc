//! Pausable elapsed-time accumulator.
//!
//! A [`Stopwatch`] measures wall-clock time between explicit instants. While
//! running it remembers the instant it was (re)started from; stopping folds
//! that span into the carried total. Every method takes the current
//! [`Instant`] as an argument, which keeps the type deterministic and lets
//! tests simulate time by adding offsets to a fixed origin.
//!
//! ```rust
//! use bubbletea_dialtimer::stopwatch::Stopwatch;
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut sw = Stopwatch::new();
//! sw.start(t0);
//! sw.stop(t0 + Duration::from_secs(5));
//!
//! // Time spent stopped does not count.
//! sw.start(t0 + Duration::from_secs(60));
//! assert_eq!(sw.elapsed(t0 + Duration::from_secs(62)), Duration::from_secs(7));
//! ```

use std::time::{Duration, Instant};

/// Elapsed time built from a running baseline plus a carried total.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    start_time: Option<Instant>,
    carried: Duration,
}

impl Stopwatch {
    /// Creates a stopped stopwatch with nothing elapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts measuring from `now`. Does nothing if already running.
    pub fn start(&mut self, now: Instant) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Folds the running span into the carried total and stops.
    pub fn stop(&mut self, now: Instant) {
        if let Some(start) = self.start_time.take() {
            self.carried += now.saturating_duration_since(start);
        }
    }

    /// Stops and clears everything.
    pub fn reset(&mut self) {
        self.start_time = None;
        self.carried = Duration::ZERO;
    }

    /// Overwrites the elapsed total as of `now`, keeping the running state.
    ///
    /// A running stopwatch is rebased so that `elapsed(now)` returns exactly
    /// `elapsed` and keeps advancing from there.
    pub fn set_elapsed(&mut self, elapsed: Duration, now: Instant) {
        self.carried = elapsed;
        if self.start_time.is_some() {
            self.start_time = Some(now);
        }
    }

    /// Total time measured as of `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let current = match self.start_time {
            Some(start) => now.saturating_duration_since(start),
            None => Duration::ZERO,
        };
        self.carried + current
    }

    /// Time carried over from completed running spans.
    pub fn carried(&self) -> Duration {
        self.carried
    }

    /// Whether the stopwatch is currently measuring.
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}
