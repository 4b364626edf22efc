//! Functional options for the timer component.
//!
//! [`crate::timer::new`] takes a slice of [`TimerOption`]s and applies them in
//! order over the defaults, so later options win:
//!
//! ```rust
//! use bubbletea_dialtimer::config::{with_duration, with_frame_rate, without_help};
//! use bubbletea_dialtimer::timer;
//! use std::time::Duration;
//!
//! let t = timer::new(&[
//!     with_duration(Duration::from_secs(25 * 60)),
//!     with_frame_rate(20),
//!     without_help(),
//! ]);
//! assert_eq!(t.view_model().duration(), Duration::from_secs(1500));
//! ```

use crate::format::MAX_DURATION;
use crate::gauge::GaugeStyle;
use crate::timer::TimerKeyMap;
use std::time::Duration;

/// Default redraw rate while running.
pub const DEFAULT_FPS: u32 = 30;

/// Default live shift per wheel notch or arrow key while running.
pub const DEFAULT_LIVE_STEP: Duration = Duration::from_secs(60);

/// Default dial size in terminal cells (columns, rows).
pub const DEFAULT_DIAL_SIZE: (usize, usize) = (32, 16);

/// Settings of a timer component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Duration configured at construction.
    pub duration: Duration,
    /// Frames per second while running.
    pub fps: u32,
    /// Minutes added or removed per arrow key press while idle.
    pub key_step_minutes: i64,
    /// Live shift per wheel notch or arrow key while running or paused.
    pub live_step: Duration,
    /// Dial size in terminal cells outside fullscreen.
    pub dial_size: (usize, usize),
    /// Dial palette.
    pub style: GaugeStyle,
    /// Show the help line.
    pub show_help: bool,
    /// Key bindings.
    pub key_map: TimerKeyMap,
    /// Start on the alternate screen with the dial filling the window.
    pub fullscreen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration: Duration::ZERO,
            fps: DEFAULT_FPS,
            key_step_minutes: 1,
            live_step: DEFAULT_LIVE_STEP,
            dial_size: DEFAULT_DIAL_SIZE,
            style: GaugeStyle::default(),
            show_help: true,
            key_map: TimerKeyMap::default(),
            fullscreen: false,
        }
    }
}

impl Config {
    /// Time between frames at the configured rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

/// A single setting applied by [`crate::timer::new`].
pub enum TimerOption {
    /// Initial duration, clamped to sixty minutes.
    WithDuration(Duration),
    /// Frames per second while running, at least one.
    WithFrameRate(u32),
    /// Minutes per arrow key press while idle.
    WithKeyStep(i64),
    /// Live shift per wheel notch or arrow key while active.
    WithLiveStep(Duration),
    /// Dial size in cells.
    WithDialSize(usize, usize),
    /// Dial palette.
    WithStyle(GaugeStyle),
    /// Hide the help line.
    WithoutHelp,
    /// Replace the key bindings.
    WithKeyMap(TimerKeyMap),
    /// Start in fullscreen.
    WithFullscreen,
}

impl TimerOption {
    pub(crate) fn apply(&self, c: &mut Config) {
        match self {
            TimerOption::WithDuration(d) => c.duration = (*d).min(MAX_DURATION),
            TimerOption::WithFrameRate(fps) => c.fps = (*fps).max(1),
            TimerOption::WithKeyStep(minutes) => c.key_step_minutes = *minutes,
            TimerOption::WithLiveStep(step) => c.live_step = *step,
            TimerOption::WithDialSize(cols, rows) => c.dial_size = (*cols, *rows),
            TimerOption::WithStyle(style) => c.style = style.clone(),
            TimerOption::WithoutHelp => c.show_help = false,
            TimerOption::WithKeyMap(keys) => c.key_map = keys.clone(),
            TimerOption::WithFullscreen => c.fullscreen = true,
        }
    }
}

/// Sets the initial duration. Zero starts a stopwatch.
pub fn with_duration(d: Duration) -> TimerOption {
    TimerOption::WithDuration(d)
}

/// Sets the redraw rate while running.
pub fn with_frame_rate(fps: u32) -> TimerOption {
    TimerOption::WithFrameRate(fps)
}

/// Sets the minutes per arrow key press while idle.
pub fn with_key_step(minutes: i64) -> TimerOption {
    TimerOption::WithKeyStep(minutes)
}

/// Sets the live shift per wheel notch or arrow key while active.
pub fn with_live_step(step: Duration) -> TimerOption {
    TimerOption::WithLiveStep(step)
}

/// Sets the dial size in terminal cells.
pub fn with_dial_size(cols: usize, rows: usize) -> TimerOption {
    TimerOption::WithDialSize(cols, rows)
}

/// Sets the dial palette.
pub fn with_style(style: GaugeStyle) -> TimerOption {
    TimerOption::WithStyle(style)
}

/// Hides the help line.
pub fn without_help() -> TimerOption {
    TimerOption::WithoutHelp
}

/// Replaces the key bindings.
pub fn with_key_map(keys: TimerKeyMap) -> TimerOption {
    TimerOption::WithKeyMap(keys)
}

/// Starts in fullscreen.
pub fn with_fullscreen() -> TimerOption {
    TimerOption::WithFullscreen
}
