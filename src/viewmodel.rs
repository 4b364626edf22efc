//! The timer state machine.
//!
//! [`TimerViewModel`] owns everything the dial displays: the configured
//! duration, the time left, whether it is counting down or up, and whether it
//! is idle, running or paused. It does no scheduling and reads no clock of
//! its own. The caller passes the current [`Instant`] into every operation
//! that depends on time, and calls [`TimerViewModel::tick`] once per frame
//! while the timer runs.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --resume--> Running
//!                  |  ^                 |
//!                  |  +-----------------+
//!                  +--expire/reset--> Idle      (reset from Paused too)
//! ```
//!
//! A duration of zero at start turns the timer into a stopwatch that counts
//! up to sixty minutes. Any other duration counts down to zero and rings the
//! alarm once on arrival.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_dialtimer::viewmodel::{TickOutcome, TimerViewModel};
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut vm = TimerViewModel::new(Duration::from_secs(120));
//! vm.start(t0);
//!
//! assert_eq!(vm.tick(t0 + Duration::from_secs(60)), TickOutcome::Running);
//! assert_eq!(vm.time_left(), Duration::from_secs(60));
//!
//! assert_eq!(
//!     vm.tick(t0 + Duration::from_secs(125)),
//!     TickOutcome::Expired { alarm: true }
//! );
//! assert_eq!(vm.time_left(), Duration::ZERO);
//! ```

use crate::format::{format_elapsed, format_remaining, MAX_DURATION};
use crate::stopwatch::Stopwatch;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Run state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Not running. The duration may be edited.
    Idle,
    /// Counting, frames should be scheduled.
    Running,
    /// Counting is suspended; elapsed time is frozen.
    Paused,
}

/// Direction the timer counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Counts the configured duration down to zero.
    Countdown,
    /// Counts up from zero to sixty minutes. Chosen when started with a zero
    /// duration.
    Stopwatch,
}

/// Result of a single [`TimerViewModel::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Inactive,
    /// Time left was updated and the timer keeps running.
    Running,
    /// The run reached its terminal value on this tick and the timer is idle
    /// again. `alarm` is true only for a countdown reaching zero.
    Expired {
        /// Whether the alarm should sound.
        alarm: bool,
    },
}

/// State machine reconciling wall-clock time with a target duration.
#[derive(Debug, Clone)]
pub struct TimerViewModel {
    state: State,
    mode: Mode,
    duration: Duration,
    time_left: Duration,
    clock: Stopwatch,
    finished: bool,
}

impl Default for TimerViewModel {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl TimerViewModel {
    /// Creates an idle timer. `duration` is clamped to sixty minutes.
    pub fn new(duration: Duration) -> Self {
        let duration = duration.min(MAX_DURATION);
        Self {
            state: State::Idle,
            mode: Mode::Countdown,
            duration,
            time_left: duration,
            clock: Stopwatch::new(),
            finished: false,
        }
    }

    /// Current run state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Current counting direction.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Configured duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time on the clock face: remaining time for a countdown, elapsed time
    /// for a stopwatch. Updated by [`tick`](Self::tick) and by live shifts.
    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    /// Whether the timer is running or paused.
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Running | State::Paused)
    }

    /// Whether the timer is running.
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Whether the timer is paused.
    pub fn is_paused(&self) -> bool {
        self.state == State::Paused
    }

    /// Whether the last run reached its end and the display still shows its
    /// terminal value.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total elapsed run time as of `now`, excluding paused spans.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.clock.elapsed(now)
    }

    /// Share of the configured duration still on the clock, in `[0, 1]`.
    ///
    /// In stopwatch mode this is the share of sixty minutes counted so far.
    pub fn progress(&self) -> f64 {
        match self.mode {
            Mode::Countdown => {
                if self.duration.is_zero() {
                    return 0.0;
                }
                (self.time_left.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            Mode::Stopwatch => {
                (self.time_left.as_secs_f64() / MAX_DURATION.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }

    /// Share of the dial the configured duration occupies, in `[0, 1]`.
    ///
    /// A stopwatch always spans the full dial.
    pub fn max_fraction(&self) -> f64 {
        match self.mode {
            Mode::Countdown => self.duration.as_secs_f64() / MAX_DURATION.as_secs_f64(),
            Mode::Stopwatch => 1.0,
        }
    }

    /// The readout shown under the dial, `MM:SS`.
    pub fn display(&self) -> String {
        match self.mode {
            Mode::Countdown => format_remaining(self.time_left),
            Mode::Stopwatch => format_elapsed(self.time_left),
        }
    }

    /// Starts a run from idle. Returns `false` if already running or paused.
    ///
    /// A zero duration starts a stopwatch; anything else starts a countdown
    /// from the full duration.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_active() {
            return false;
        }

        self.mode = if self.duration.is_zero() {
            Mode::Stopwatch
        } else {
            Mode::Countdown
        };
        self.time_left = match self.mode {
            Mode::Countdown => self.duration,
            Mode::Stopwatch => Duration::ZERO,
        };
        self.finished = false;
        self.clock.reset();
        self.clock.start(now);
        self.state = State::Running;

        debug!(
            "timer started: mode={:?} duration={}s",
            self.mode,
            self.duration.as_secs()
        );
        true
    }

    /// Suspends a running timer, freezing elapsed time.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.state != State::Running {
            return false;
        }
        self.clock.stop(now);
        self.time_left = self.face_value(self.clock.carried());
        self.state = State::Paused;
        debug!("timer paused: elapsed={:?}", self.clock.carried());
        true
    }

    /// Continues a paused timer from where it was frozen.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.state != State::Paused {
            return false;
        }
        self.clock.start(now);
        self.state = State::Running;
        debug!("timer resumed: elapsed={:?}", self.clock.carried());
        true
    }

    /// Starts, pauses or resumes, whichever applies.
    pub fn toggle(&mut self, now: Instant) -> bool {
        match self.state {
            State::Idle => self.start(now),
            State::Running => self.pause(now),
            State::Paused => self.resume(now),
        }
    }

    /// Advances a running timer to `now`.
    ///
    /// Only a tick that crosses the terminal value reports
    /// [`TickOutcome::Expired`]; afterwards the timer is idle and further
    /// ticks are [`TickOutcome::Inactive`], so the alarm sounds once per run.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.state != State::Running {
            return TickOutcome::Inactive;
        }

        let elapsed = self.clock.elapsed(now);
        self.time_left = self.face_value(elapsed);

        let done = match self.mode {
            Mode::Countdown => self.time_left.is_zero(),
            Mode::Stopwatch => self.time_left >= MAX_DURATION,
        };
        if !done {
            return TickOutcome::Running;
        }

        self.clock.stop(now);
        self.state = State::Idle;
        self.finished = true;

        let alarm = self.mode == Mode::Countdown;
        if alarm {
            info!("countdown of {}s complete", self.duration.as_secs());
        } else {
            info!("stopwatch reached its limit");
        }
        TickOutcome::Expired { alarm }
    }

    /// Abandons the current run and restores the configured duration.
    ///
    /// Never reports an expiry, so the alarm cannot sound from a reset.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.state = State::Idle;
        self.mode = Mode::Countdown;
        self.time_left = self.duration;
        self.finished = false;
        debug!("timer reset to {}s", self.duration.as_secs());
    }

    /// Replaces the configured duration. Only allowed while idle.
    pub fn set_duration(&mut self, duration: Duration) -> bool {
        if self.is_active() {
            return false;
        }
        self.duration = duration.min(MAX_DURATION);
        self.time_left = self.duration;
        self.mode = Mode::Countdown;
        self.finished = false;
        true
    }

    /// Moves the configured duration by whole minutes, clamped to
    /// `[0, 60]` minutes. Only allowed while idle.
    pub fn adjust_duration(&mut self, delta_minutes: i64) -> bool {
        if self.is_active() {
            return false;
        }
        let secs =
            (self.duration.as_secs() as i64).saturating_add(delta_minutes.saturating_mul(60));
        let secs = secs.clamp(0, MAX_DURATION.as_secs() as i64) as u64;
        self.set_duration(Duration::from_secs(secs))
    }

    /// Shifts the time on the clock by `delta_seconds` while running or
    /// paused.
    ///
    /// The elapsed baseline is rewritten with the time left, so later ticks
    /// continue from the shifted value. A countdown is clamped to
    /// `[0, duration]`; the configured duration itself never changes. A
    /// stopwatch is clamped to `[0, 60]` minutes.
    pub fn adjust_time_left(&mut self, delta_seconds: i64, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }
        let current = self.face_value(self.clock.elapsed(now)).as_millis() as i128;
        let target = (current + i128::from(delta_seconds) * 1000).max(0);
        let target = Duration::from_millis(target.min(u64::MAX as i128) as u64);
        self.set_time_left(target, now)
    }

    /// Sets the time on the clock to an absolute value while running or
    /// paused. Clamped as for [`adjust_time_left`](Self::adjust_time_left).
    pub fn set_time_left(&mut self, time_left: Duration, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }
        let time_left = time_left.min(self.limit());
        let elapsed = match self.mode {
            Mode::Countdown => self.duration.saturating_sub(time_left),
            Mode::Stopwatch => time_left,
        };
        self.clock.set_elapsed(elapsed, now);
        self.time_left = time_left;
        debug!("time shifted: time_left={:?} elapsed={:?}", time_left, elapsed);
        true
    }

    fn limit(&self) -> Duration {
        match self.mode {
            Mode::Countdown => self.duration,
            Mode::Stopwatch => MAX_DURATION,
        }
    }

    fn face_value(&self, elapsed: Duration) -> Duration {
        match self.mode {
            Mode::Countdown => self.duration.saturating_sub(elapsed),
            Mode::Stopwatch => elapsed.min(MAX_DURATION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_new_is_idle_countdown() {
        let vm = TimerViewModel::new(secs(300));
        assert_eq!(vm.state(), State::Idle);
        assert_eq!(vm.mode(), Mode::Countdown);
        assert_eq!(vm.duration(), secs(300));
        assert_eq!(vm.time_left(), secs(300));
        assert!(!vm.is_finished());
        assert_eq!(vm.display(), "05:00");
    }

    #[test]
    fn test_new_clamps_duration() {
        let vm = TimerViewModel::new(secs(9000));
        assert_eq!(vm.duration(), MAX_DURATION);
    }

    #[test]
    fn test_countdown_reaches_zero_for_every_duration() {
        let t0 = Instant::now();
        for d in (1..=3600).step_by(37).chain([1, 59, 60, 3599, 3600]) {
            let mut vm = TimerViewModel::new(secs(d));
            assert!(vm.start(t0));
            assert_eq!(vm.mode(), Mode::Countdown);
            if d > 1 {
                assert_eq!(vm.tick(t0 + secs(d - 1)), TickOutcome::Running);
            }
            assert_eq!(
                vm.tick(t0 + secs(d)),
                TickOutcome::Expired { alarm: true },
                "duration {}",
                d
            );
            assert_eq!(vm.time_left(), Duration::ZERO);
        }
    }

    #[test]
    fn test_two_minute_example() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(120));
        vm.start(t0);

        let mut alarms = 0;
        for s in 1..=125 {
            if vm.tick(t0 + secs(s)) == (TickOutcome::Expired { alarm: true }) {
                alarms += 1;
            }
        }

        assert_eq!(vm.time_left(), Duration::ZERO);
        assert_eq!(alarms, 1);
        assert_eq!(vm.state(), State::Idle);
        assert!(vm.is_finished());
        assert_eq!(vm.display(), "00:00");
    }

    #[test]
    fn test_start_while_active_is_noop() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(60));
        assert!(vm.start(t0));
        assert!(!vm.start(t0 + secs(10)));
        vm.pause(t0 + secs(20));
        assert!(!vm.start(t0 + secs(30)));
        assert_eq!(vm.state(), State::Paused);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(600));
        vm.start(t0);
        vm.tick(t0 + secs(100));

        assert!(vm.pause(t0 + secs(100)));
        assert_eq!(vm.elapsed(t0 + secs(400)), secs(100));
        // Ticks while paused change nothing.
        assert_eq!(vm.tick(t0 + secs(400)), TickOutcome::Inactive);
        assert_eq!(vm.time_left(), secs(500));

        assert!(vm.resume(t0 + secs(400)));
        vm.tick(t0 + secs(450));
        assert_eq!(vm.elapsed(t0 + secs(450)), secs(150));
        assert_eq!(vm.time_left(), secs(450));
    }

    #[test]
    fn test_pause_updates_time_left() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(60));
        vm.start(t0);
        vm.pause(t0 + Duration::from_millis(10_500));
        assert_eq!(vm.time_left(), Duration::from_millis(49_500));
        assert_eq!(vm.display(), "00:50");
    }

    #[test]
    fn test_repeated_pause_resume_cycles() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(100));
        vm.start(t0);
        // Run 10s, pause 90s, five times: 50s of running in 500s of wall time.
        for i in 0..5 {
            let base = t0 + secs(i * 100);
            vm.pause(base + secs(10));
            vm.resume(base + secs(100));
        }
        assert_eq!(vm.tick(t0 + secs(500)), TickOutcome::Running);
        assert_eq!(vm.time_left(), secs(50));
    }

    #[test]
    fn test_pause_resume_only_from_matching_state() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(60));
        assert!(!vm.pause(t0));
        assert!(!vm.resume(t0));
        vm.start(t0);
        assert!(!vm.resume(t0));
        vm.pause(t0);
        assert!(!vm.pause(t0));
    }

    #[test]
    fn test_toggle_cycles_states() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(60));
        assert!(vm.toggle(t0));
        assert_eq!(vm.state(), State::Running);
        assert!(vm.toggle(t0 + secs(1)));
        assert_eq!(vm.state(), State::Paused);
        assert!(vm.toggle(t0 + secs(2)));
        assert_eq!(vm.state(), State::Running);
    }

    #[test]
    fn test_reset_restores_pre_start_pair() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(90));
        let before = (vm.duration(), vm.time_left());

        vm.start(t0);
        vm.tick(t0 + secs(30));
        vm.reset();
        assert_eq!((vm.duration(), vm.time_left()), before);
        assert_eq!(vm.state(), State::Idle);

        vm.start(t0);
        vm.pause(t0 + secs(10));
        vm.reset();
        assert_eq!((vm.duration(), vm.time_left()), before);

        vm.start(t0);
        vm.tick(t0 + secs(200));
        assert!(vm.is_finished());
        vm.reset();
        assert_eq!((vm.duration(), vm.time_left()), before);
        assert!(!vm.is_finished());
    }

    #[test]
    fn test_reset_never_alarms() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(10));
        vm.start(t0);
        vm.tick(t0 + secs(9));
        vm.reset();
        // The would-be expiry instant passes with the timer idle.
        assert_eq!(vm.tick(t0 + secs(10)), TickOutcome::Inactive);
        assert_eq!(vm.tick(t0 + secs(20)), TickOutcome::Inactive);
    }

    #[test]
    fn test_reset_clears_stopwatch_mode() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(Duration::ZERO);
        vm.start(t0);
        assert_eq!(vm.mode(), Mode::Stopwatch);
        vm.reset();
        assert_eq!(vm.mode(), Mode::Countdown);
        assert_eq!(vm.time_left(), Duration::ZERO);
    }

    #[test]
    fn test_stopwatch_counts_up_and_caps() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(Duration::ZERO);
        vm.start(t0);
        assert_eq!(vm.mode(), Mode::Stopwatch);

        vm.tick(t0 + secs(75));
        assert_eq!(vm.time_left(), secs(75));
        assert_eq!(vm.display(), "01:15");

        assert_eq!(vm.tick(t0 + secs(3599)), TickOutcome::Running);
        assert_eq!(
            vm.tick(t0 + secs(4000)),
            TickOutcome::Expired { alarm: false }
        );
        assert_eq!(vm.time_left(), MAX_DURATION);
        assert_eq!(vm.display(), "60:00");
        assert_eq!(vm.tick(t0 + secs(5000)), TickOutcome::Inactive);
    }

    #[test]
    fn test_alarm_fires_once_per_completion() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(5));
        let mut alarms = 0;

        for run in 0..3u64 {
            let start = t0 + secs(run * 100);
            vm.start(start);
            for s in 0..20 {
                if let TickOutcome::Expired { alarm: true } = vm.tick(start + secs(s)) {
                    alarms += 1;
                }
            }
        }
        assert_eq!(alarms, 3);
    }

    #[test]
    fn test_restart_after_finish_uses_duration() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(30));
        vm.start(t0);
        vm.tick(t0 + secs(30));
        assert_eq!(vm.time_left(), Duration::ZERO);

        assert!(vm.start(t0 + secs(40)));
        assert_eq!(vm.time_left(), secs(30));
        assert!(!vm.is_finished());
    }

    #[test]
    fn test_adjust_duration_only_when_idle() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(600));
        assert!(vm.adjust_duration(5));
        assert_eq!(vm.duration(), secs(900));
        assert_eq!(vm.time_left(), secs(900));

        vm.start(t0);
        assert!(!vm.adjust_duration(1));
        assert_eq!(vm.duration(), secs(900));
        assert!(!vm.set_duration(secs(10)));
    }

    #[test]
    fn test_adjust_duration_clamps() {
        let mut vm = TimerViewModel::new(secs(120));
        vm.adjust_duration(-10);
        assert_eq!(vm.duration(), Duration::ZERO);
        vm.adjust_duration(100);
        assert_eq!(vm.duration(), MAX_DURATION);
        vm.adjust_duration(i64::MAX);
        assert_eq!(vm.duration(), MAX_DURATION);
    }

    #[test]
    fn test_live_shift_keeps_countdown_consistent() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(600));
        vm.start(t0);
        vm.tick(t0 + secs(200));
        assert_eq!(vm.time_left(), secs(400));

        assert!(vm.adjust_time_left(30, t0 + secs(200)));
        assert_eq!(vm.time_left(), secs(430));
        assert_eq!(vm.duration(), secs(600));

        vm.tick(t0 + secs(210));
        assert_eq!(vm.time_left(), secs(420));
        assert_eq!(vm.tick(t0 + secs(630)), TickOutcome::Expired { alarm: true });
    }

    #[test]
    fn test_live_shift_clamps_to_duration_and_zero() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(100));
        vm.start(t0);
        vm.adjust_time_left(1000, t0 + secs(10));
        assert_eq!(vm.time_left(), secs(100));
        vm.adjust_time_left(-1000, t0 + secs(10));
        assert_eq!(vm.time_left(), Duration::ZERO);
        // Reaching zero by a shift still rings on the next frame.
        assert_eq!(vm.tick(t0 + secs(10)), TickOutcome::Expired { alarm: true });
    }

    #[test]
    fn test_live_shift_while_paused() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(300));
        vm.start(t0);
        vm.pause(t0 + secs(100));

        assert!(vm.adjust_time_left(-60, t0 + secs(150)));
        assert_eq!(vm.time_left(), secs(140));
        assert_eq!(vm.state(), State::Paused);

        vm.resume(t0 + secs(500));
        vm.tick(t0 + secs(510));
        assert_eq!(vm.time_left(), secs(130));
    }

    #[test]
    fn test_live_shift_rejected_when_idle() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(300));
        assert!(!vm.adjust_time_left(10, t0));
        assert!(!vm.set_time_left(secs(5), t0));
        assert_eq!(vm.time_left(), secs(300));
    }

    #[test]
    fn test_stopwatch_shift_clamps_to_hour() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(Duration::ZERO);
        vm.start(t0);
        vm.set_time_left(secs(9999), t0 + secs(1));
        assert_eq!(vm.time_left(), MAX_DURATION);
        assert_eq!(vm.tick(t0 + secs(1)), TickOutcome::Expired { alarm: false });
    }

    #[test]
    fn test_progress_and_max_fraction() {
        let t0 = Instant::now();
        let mut vm = TimerViewModel::new(secs(1800));
        assert_eq!(vm.progress(), 1.0);
        assert_eq!(vm.max_fraction(), 0.5);

        vm.start(t0);
        vm.tick(t0 + secs(900));
        assert!((vm.progress() - 0.5).abs() < 1e-9);

        let mut sw = TimerViewModel::new(Duration::ZERO);
        assert_eq!(sw.progress(), 0.0);
        sw.start(t0);
        sw.tick(t0 + secs(900));
        assert!((sw.progress() - 0.25).abs() < 1e-9);
        assert_eq!(sw.max_fraction(), 1.0);
    }
}
