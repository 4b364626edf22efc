#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-dialtimer/")]

//! # bubbletea-dialtimer
//!
//! A radial countdown timer and stopwatch for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! terminal applications.
//!
//! ## Overview
//!
//! The dial reads like a kitchen timer: a full turn is sixty minutes and a red
//! sector shows the time left, shrinking toward twelve o'clock as the countdown
//! runs. A faint ghost sector keeps the configured duration in view. Starting
//! with a zero duration turns the dial into a stopwatch that fills up instead,
//! stopping at the hour.
//!
//! The crate is layered so each part can be used on its own:
//!
//! - [`viewmodel`]: the timer state machine, driven by explicit instants
//! - [`gauge`]: a pure function from progress to draw commands
//! - [`canvas`]: rasterizes draw commands into half-block terminal cells
//! - [`timer`]: the Bubble Tea component tying them to keys, mouse and frames
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_dialtimer::prelude::*;
//! use std::time::Duration;
//!
//! let mut timer = timer_new(&[with_duration(Duration::from_secs(5 * 60))]);
//! let _first_frame = timer.start();
//! assert!(timer.view_model().is_running());
//! assert!(timer.view().contains("05:00"));
//! ```
//!
//! ## Driving the State Machine Directly
//!
//! ```rust
//! use bubbletea_dialtimer::viewmodel::{State, TickOutcome, TimerViewModel};
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut vm = TimerViewModel::new(Duration::from_secs(120));
//! vm.start(t0);
//! vm.tick(t0 + Duration::from_secs(30));
//! assert_eq!(vm.display(), "01:30");
//!
//! let outcome = vm.tick(t0 + Duration::from_secs(120));
//! assert_eq!(outcome, TickOutcome::Expired { alarm: true });
//! assert_eq!(vm.state(), State::Idle);
//! ```

pub mod alarm;
pub mod canvas;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod gauge;
pub mod gesture;
pub mod help;
pub mod key;
pub mod stopwatch;
pub mod timer;
pub mod viewmodel;

use bubbletea_rs::Cmd;

/// Components that take keyboard focus.
///
/// A focused component consumes key presses before anything else sees
/// them. The timer uses this for its duration entry: while the entry is
/// focused, typing digits never triggers timer bindings.
///
/// ```rust
/// use bubbletea_dialtimer::prelude::*;
///
/// let mut entry = DurationEntry::new();
/// assert!(!entry.focused());
/// entry.focus();
/// assert!(entry.focused());
/// entry.blur();
/// assert!(!entry.focused());
/// ```
pub trait Component {
    /// Gives the component focus. May return a command to run, for example
    /// a cursor blink.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes focus away.
    fn blur(&mut self);

    /// Whether the component has focus.
    fn focused(&self) -> bool;
}

pub use alarm::{sound, Alarm, Bell};
pub use canvas::Canvas;
pub use config::{Config, TimerOption};
pub use entry::{EntryEvent, Model as DurationEntry};
pub use error::{Error, Result};
pub use gauge::{DrawCommand, Gauge, GaugeStyle, Rgb};
pub use help::Model as HelpModel;
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use stopwatch::Stopwatch;
pub use timer::{
    new as timer_new, AlarmMsg, FrameMsg, Model as Timer, TimeoutMsg, TimerKeyMap,
};
pub use viewmodel::{Mode, State, TickOutcome, TimerViewModel};

/// Common imports.
///
/// ```rust
/// use bubbletea_dialtimer::prelude::*;
/// use bubbletea_rs::{Cmd, Model, Msg};
///
/// struct App {
///     timer: Timer,
/// }
///
/// impl Model for App {
///     fn init() -> (Self, Option<Cmd>) {
///         let timer = timer_new(&[with_frame_rate(24)]);
///         let cmd = timer.init();
///         (Self { timer }, cmd)
///     }
///
///     fn update(&mut self, msg: Msg) -> Option<Cmd> {
///         if msg.downcast_ref::<AlarmMsg>().is_some() {
///             sound(&mut Bell::stdout());
///         }
///         self.timer.update(msg)
///     }
///
///     fn view(&self) -> String {
///         self.timer.view()
///     }
/// }
/// ```
pub mod prelude {
    pub use crate::alarm::{sound, Alarm, Bell};
    pub use crate::config::{
        with_dial_size, with_duration, with_frame_rate, with_fullscreen, with_key_map,
        with_key_step, with_live_step, with_style, without_help, TimerOption,
    };
    pub use crate::entry::{EntryEvent, Model as DurationEntry};
    pub use crate::gauge::{Gauge, GaugeStyle, Rgb};
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::timer::{
        new as timer_new, AlarmMsg, FrameMsg, Model as Timer, TimeoutMsg, TimerKeyMap,
    };
    pub use crate::viewmodel::{Mode, State, TimerViewModel};
    pub use crate::Component;
}
