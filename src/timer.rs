//! Radial timer component for Bubble Tea applications.
//!
//! The component draws a dial whose red sector shrinks as a countdown runs,
//! with a `MM:SS` readout and a status line underneath. Setting the duration
//! to zero turns it into a stopwatch that fills the dial over an hour.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_dialtimer::config::with_duration;
//! use bubbletea_dialtimer::timer;
//! use std::time::Duration;
//!
//! let mut t = timer::new(&[with_duration(Duration::from_secs(300))]);
//! let _frame = t.start(); // schedule the first frame
//! assert!(t.view_model().is_running());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use bubbletea_dialtimer::timer::{self, AlarmMsg, Model};
//!
//! struct App {
//!     timer: Model,
//!     rang: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let timer = timer::new(&[]);
//!         let cmd = timer.init();
//!         (Self { timer, rang: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(alarm) = msg.downcast_ref::<AlarmMsg>() {
//!             if alarm.id == self.timer.id() {
//!                 self.rang = true;
//!             }
//!         }
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.timer.view()
//!     }
//! }
//! ```
//!
//! # Input
//!
//! | Input | Idle | Running / Paused |
//! |-------|------|------------------|
//! | `space` | start | pause / resume |
//! | `r`, right click | reset | reset |
//! | `↑`/`k`, wheel up | +1 minute, +1 notch | +live step |
//! | `↓`/`j`, wheel down | -1 minute, -1 notch | -live step |
//! | drag on dial | set duration | set time left |
//! | `e` | type a duration | |
//! | `f` | fullscreen | fullscreen |
//! | `?` | more help | more help |
//! | `q`, `ctrl+c` | quit | quit |

use crate::canvas::Canvas;
use crate::config::{Config, TimerOption};
use crate::entry::{self, EntryEvent};
use crate::gauge::Gauge;
use crate::gesture::{self, WheelDirection};
use crate::help;
use crate::key::{Binding, KeyMap};
use crate::viewmodel::{Mode, State, TickOutcome, TimerViewModel};
use crate::Component;
use bubbletea_rs::{
    tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, MouseMsg, Msg, WindowSizeMsg,
};
use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
use lipgloss_extras::prelude::*;
use log::debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

// Internal ID management for timer instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

// Lines under the dial in fullscreen besides help: readout, status, entry.
const STATUS_LINES: usize = 3;

/// Per-frame redraw message.
///
/// Only the most recently scheduled frame is honored. Starting, pausing,
/// resetting and expiring all bump the timer's tag, which cancels whatever
/// frame is still in flight.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    /// The timer that scheduled the frame.
    pub id: i64,
    tag: i64,
}

/// Sent once when a countdown reaches zero. The host should sound the
/// alarm, for example with [`crate::alarm::Bell`].
#[derive(Debug, Clone)]
pub struct AlarmMsg {
    /// The timer that expired.
    pub id: i64,
}

/// Sent once when a stopwatch reaches sixty minutes.
#[derive(Debug, Clone)]
pub struct TimeoutMsg {
    /// The timer that stopped.
    pub id: i64,
}

/// Key bindings of the timer.
#[derive(Debug, Clone)]
pub struct TimerKeyMap {
    /// Start, pause or resume.
    pub toggle: Binding,
    /// Reset to the configured duration.
    pub reset: Binding,
    /// Add time.
    pub increase: Binding,
    /// Remove time.
    pub decrease: Binding,
    /// Type a duration.
    pub edit: Binding,
    /// Toggle fullscreen.
    pub fullscreen: Binding,
    /// Toggle the full help.
    pub help: Binding,
    /// Quit the program.
    pub quit: Binding,
}

impl Default for TimerKeyMap {
    fn default() -> Self {
        Self {
            toggle: Binding::new(vec!["space"]).with_help("space", "start/pause"),
            reset: Binding::new(vec!["r"]).with_help("r", "reset"),
            increase: Binding::new(vec!["up", "k", "+"]).with_help("↑/k", "more time"),
            decrease: Binding::new(vec!["down", "j", "-"]).with_help("↓/j", "less time"),
            edit: Binding::new(vec!["e"]).with_help("e", "set duration"),
            fullscreen: Binding::new(vec!["f"]).with_help("f", "fullscreen"),
            help: Binding::new(vec!["?"]).with_help("?", "more"),
            quit: Binding::new(vec!["q", "ctrl+c"]).with_help("q", "quit"),
        }
    }
}

impl KeyMap for TimerKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.toggle,
            &self.reset,
            &self.increase,
            &self.decrease,
            &self.help,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.toggle, &self.reset],
            vec![&self.increase, &self.decrease, &self.edit],
            vec![&self.fullscreen, &self.help, &self.quit],
        ]
    }
}

/// Radial countdown timer and stopwatch.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,
    vm: TimerViewModel,
    config: Config,
    gauge: Gauge,
    canvas: Canvas,
    entry: entry::Model,
    help: help::Model,
    fullscreen: bool,
    window: (usize, usize),
    dragging: bool,
}

/// Creates a timer from options applied over the defaults.
pub fn new(opts: &[TimerOption]) -> Model {
    let mut config = Config::default();
    for opt in opts {
        opt.apply(&mut config);
    }

    let (cols, rows) = config.dial_size;
    let mut m = Model {
        id: next_id(),
        tag: 0,
        vm: TimerViewModel::new(config.duration),
        gauge: Gauge::with_style(config.style.clone()),
        canvas: Canvas::new(cols, rows),
        entry: entry::Model::new(),
        help: help::Model::new().with_width(cols),
        fullscreen: config.fullscreen,
        window: (0, 0),
        dragging: false,
        config,
    };
    m.redraw();
    m
}

impl Model {
    /// Unique identifier of this timer, carried by its messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The underlying state machine.
    pub fn view_model(&self) -> &TimerViewModel {
        &self.vm
    }

    /// Settings in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the dial fills the terminal.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether the duration entry has focus.
    pub fn is_editing(&self) -> bool {
        self.entry.focused()
    }

    /// Command to run at program start: enters the alternate screen when
    /// configured to start fullscreen.
    pub fn init(&self) -> Option<Cmd> {
        if self.fullscreen {
            Some(bubbletea_rs::enter_alt_screen())
        } else {
            None
        }
    }

    /// Starts from idle and schedules the first frame.
    pub fn start(&mut self) -> Option<Cmd> {
        if !self.vm.start(Instant::now()) {
            return None;
        }
        self.entry.blur();
        self.redraw();
        Some(self.restart_frames())
    }

    /// Pauses a running timer and cancels its frames.
    pub fn pause(&mut self) {
        if self.vm.pause(Instant::now()) {
            self.cancel_frames();
            self.redraw();
        }
    }

    /// Resumes a paused timer and schedules the next frame.
    pub fn resume(&mut self) -> Option<Cmd> {
        if !self.vm.resume(Instant::now()) {
            return None;
        }
        self.redraw();
        Some(self.restart_frames())
    }

    /// Starts, pauses or resumes, whichever applies.
    pub fn toggle(&mut self) -> Option<Cmd> {
        match self.vm.state() {
            State::Idle => self.start(),
            State::Running => {
                self.pause();
                None
            }
            State::Paused => self.resume(),
        }
    }

    /// Cancels the run and restores the configured duration.
    pub fn reset(&mut self) {
        self.cancel_frames();
        self.vm.reset();
        self.dragging = false;
        self.redraw();
    }

    /// Sets the duration. Ignored unless idle.
    pub fn set_duration(&mut self, duration: Duration) -> bool {
        let changed = self.vm.set_duration(duration);
        if changed {
            self.redraw();
        }
        changed
    }

    /// Switches fullscreen on or off and returns the screen command.
    pub fn toggle_fullscreen(&mut self) -> Cmd {
        self.fullscreen = !self.fullscreen;
        self.fit_canvas();
        self.redraw();
        debug!("fullscreen: {}", self.fullscreen);
        if self.fullscreen {
            bubbletea_rs::enter_alt_screen()
        } else {
            bubbletea_rs::exit_alt_screen()
        }
    }

    /// Handles a mouse event at (`col`, `row`) relative to the top-left
    /// corner of the view.
    pub fn handle_mouse(&mut self, col: u16, row: u16, kind: MouseEventKind) {
        let (col, row) = (usize::from(col), usize::from(row));
        let on_canvas = col < self.canvas.width() && row < self.canvas.height();
        let now = Instant::now();

        let changed = match kind {
            MouseEventKind::ScrollUp if on_canvas => {
                gesture::apply_wheel(&mut self.vm, WheelDirection::Up, self.config.live_step, now)
            }
            MouseEventKind::ScrollDown if on_canvas => gesture::apply_wheel(
                &mut self.vm,
                WheelDirection::Down,
                self.config.live_step,
                now,
            ),
            MouseEventKind::Down(MouseButton::Left) if on_canvas => {
                match self.canvas.angle_at(col, row) {
                    Some(angle) => {
                        self.dragging = true;
                        gesture::apply_drag(&mut self.vm, angle, now)
                    }
                    None => false,
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                let (angle, _) = self.canvas.point_at(col, row);
                gesture::apply_drag(&mut self.vm, angle, now)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = false;
                false
            }
            MouseEventKind::Down(MouseButton::Right) if on_canvas => {
                if self.canvas.angle_at(col, row).is_some() {
                    self.reset();
                }
                false
            }
            _ => false,
        };

        if changed {
            self.redraw();
        }
    }

    /// Processes frame, key, mouse and window-size messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            if frame.id != self.id || frame.tag != self.tag {
                return None;
            }
            return self.on_frame(Instant::now());
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.on_key(key_msg);
        }

        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            self.handle_mouse(mouse.x, mouse.y, mouse.button);
            return None;
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.window = (usize::from(size.width), usize::from(size.height));
            self.fit_canvas();
            self.redraw();
        }

        None
    }

    /// Renders the dial, the readout, the status line, the entry field
    /// while editing and the help line.
    pub fn view(&self) -> String {
        let width = self.canvas.width();
        let mut lines = vec![self.canvas.view()];

        let readout = self.vm.display();
        let readout_style = if self.vm.is_paused() {
            Style::new().bold(true).faint(true)
        } else {
            Style::new().bold(true)
        };
        lines.push(center(&readout, &readout_style, width));

        let status = format!("{} · {}", self.state_label(), self.mode_label());
        lines.push(center(
            &status,
            &Style::new().foreground(Color::from("#626262")),
            width,
        ));

        if self.entry.focused() {
            lines.push(self.entry.view());
        }
        if self.config.show_help {
            lines.push(self.help.view(&self.config.key_map));
        }
        lines.join("\n")
    }

    fn on_frame(&mut self, now: Instant) -> Option<Cmd> {
        let outcome = self.vm.tick(now);
        self.redraw();
        let id = self.id;
        match outcome {
            TickOutcome::Running => Some(self.next_frame()),
            TickOutcome::Inactive => None,
            TickOutcome::Expired { alarm: true } => {
                self.cancel_frames();
                Some(bubbletea_tick(Duration::from_nanos(1), move |_| {
                    Box::new(AlarmMsg { id }) as Msg
                }))
            }
            TickOutcome::Expired { alarm: false } => {
                self.cancel_frames();
                Some(bubbletea_tick(Duration::from_nanos(1), move |_| {
                    Box::new(TimeoutMsg { id }) as Msg
                }))
            }
        }
    }

    fn on_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let keys = &self.config.key_map;
        if self.entry.focused() {
            // Plain letters are text while editing; ctrl+c still quits.
            if key_msg.modifiers.contains(KeyModifiers::CONTROL) && keys.quit.matches(key_msg) {
                return Some(bubbletea_rs::quit());
            }
            if let Some(EntryEvent::Commit(d)) = self.entry.handle_key(key_msg) {
                self.set_duration(d);
            }
            return None;
        }

        let now = Instant::now();
        if keys.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        }
        if keys.toggle.matches(key_msg) {
            return self.toggle();
        }
        if keys.reset.matches(key_msg) {
            self.reset();
            return None;
        }
        if keys.fullscreen.matches(key_msg) {
            return Some(self.toggle_fullscreen());
        }
        if keys.help.matches(key_msg) {
            self.help.show_all = !self.help.show_all;
            self.fit_canvas();
            self.redraw();
            return None;
        }
        if keys.edit.matches(key_msg) {
            if self.vm.is_active() {
                return None;
            }
            self.entry.reset();
            return self.entry.focus();
        }

        let direction = if keys.increase.matches(key_msg) {
            1
        } else if keys.decrease.matches(key_msg) {
            -1
        } else {
            return None;
        };
        let changed = if self.vm.is_active() {
            let step = self.config.live_step.as_secs() as i64;
            self.vm.adjust_time_left(direction * step, now)
        } else {
            self.vm.adjust_duration(direction * self.config.key_step_minutes)
        };
        if changed {
            self.redraw();
        }
        None
    }

    fn redraw(&mut self) {
        let cmds = self
            .gauge
            .render(self.vm.progress(), self.vm.max_fraction(), self.vm.is_paused());
        self.canvas.draw(&cmds);
    }

    fn fit_canvas(&mut self) {
        let (cols, rows) = if self.fullscreen && self.window.0 > 0 {
            let (w, h) = self.window;
            (w, h.saturating_sub(self.footer_lines()).max(1))
        } else {
            self.config.dial_size
        };
        if (cols, rows) != (self.canvas.width(), self.canvas.height()) {
            self.canvas.resize(cols, rows);
            self.help.width = cols;
        }
    }

    fn footer_lines(&self) -> usize {
        let help = if !self.config.show_help {
            0
        } else if self.help.show_all {
            let groups = self.config.key_map.full_help();
            groups.iter().map(|g| g.len()).max().unwrap_or(0)
        } else {
            1
        };
        STATUS_LINES + help
    }

    fn cancel_frames(&mut self) {
        self.tag += 1;
    }

    fn restart_frames(&mut self) -> Cmd {
        self.cancel_frames();
        self.next_frame()
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.config.frame_interval(), move |_| {
            Box::new(FrameMsg { id, tag }) as Msg
        })
    }

    fn state_label(&self) -> &'static str {
        match self.vm.state() {
            State::Idle if self.vm.is_finished() => "DONE",
            State::Idle => "IDLE",
            State::Running => "RUNNING",
            State::Paused => "PAUSED",
        }
    }

    fn mode_label(&self) -> &'static str {
        let mode = if self.vm.is_active() || self.vm.is_finished() {
            self.vm.mode()
        } else if self.vm.duration().is_zero() {
            Mode::Stopwatch
        } else {
            Mode::Countdown
        };
        match mode {
            Mode::Countdown => "countdown",
            Mode::Stopwatch => "stopwatch",
        }
    }
}

fn center(text: &str, style: &Style, width: usize) -> String {
    let pad = width.saturating_sub(UnicodeWidthStr::width(text)) / 2;
    format!("{}{}", " ".repeat(pad), style.render(text))
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = new(&[]);
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
