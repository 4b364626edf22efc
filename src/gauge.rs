//! Radial gauge renderer.
//!
//! [`Gauge::render`] turns a progress fraction into a list of
//! [`DrawCommand`]s describing a dial: a round face, a dim "ghost" sector
//! showing the configured duration, a bright sector showing what is left,
//! and sixty minor plus twelve major tick marks around the rim. Sectors
//! sweep clockwise from twelve o'clock.
//!
//! The renderer is a pure function of its inputs. It holds no state beyond
//! its color palette, so calling it every frame is always safe and always
//! produces the same commands for the same inputs. The commands are in
//! painter's order and any surface that can fill discs, sectors and line
//! segments can draw them; [`crate::canvas::Canvas`] is the terminal one.
//!
//! Geometry is normalized: the dial is centered on the origin with radius
//! `1.0`, and angles are radians measured clockwise from twelve o'clock.
//!
//! ```rust
//! use bubbletea_dialtimer::gauge::{DrawCommand, Gauge};
//! use std::f64::consts::PI;
//!
//! let gauge = Gauge::default();
//! // Half of a thirty minute timer is left: the fill covers a quarter turn.
//! let cmds = gauge.render(0.5, 0.5, false);
//!
//! let fill = cmds
//!     .iter()
//!     .filter_map(|c| match c {
//!         DrawCommand::Sector { sweep, .. } => Some(*sweep),
//!         _ => None,
//!     })
//!     .last()
//!     .unwrap();
//! assert!((fill - PI / 2.0).abs() < 1e-9);
//! ```

use std::f64::consts::TAU;

/// Number of minor ticks around the dial, one per minute.
pub const MINOR_TICKS: usize = 60;

/// Number of major ticks around the dial, one per five minutes.
pub const MAJOR_TICKS: usize = 12;

const SECTOR_RADIUS: f64 = 0.94;
const MINOR_TICK_INNER: f64 = 0.90;
const MAJOR_TICK_INNER: f64 = 0.78;
const MINOR_TICK_WIDTH: f64 = 0.02;
const MAJOR_TICK_WIDTH: f64 = 0.045;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Formats as `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Halves every channel.
    pub fn dim(&self) -> Self {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

/// One primitive of the dial, in painter's order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled circle centered on the dial.
    Disc {
        /// Radius relative to the dial.
        radius: f64,
        /// Fill color.
        color: Rgb,
    },
    /// A filled pie slice from the center, starting at `start` and sweeping
    /// clockwise by `sweep`.
    Sector {
        /// Start angle in radians clockwise from twelve o'clock.
        start: f64,
        /// Angular extent in radians, in `(0, 2π]`.
        sweep: f64,
        /// Radius relative to the dial.
        radius: f64,
        /// Fill color.
        color: Rgb,
    },
    /// A radial line segment on the rim.
    Tick {
        /// Angle in radians clockwise from twelve o'clock.
        angle: f64,
        /// Inner end of the segment, relative to the dial radius.
        inner: f64,
        /// Outer end of the segment, relative to the dial radius.
        outer: f64,
        /// Stroke width relative to the dial radius.
        width: f64,
        /// Whether this is a five-minute mark.
        major: bool,
        /// Stroke color.
        color: Rgb,
    },
}

/// Colors of the dial.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeStyle {
    /// The dial face.
    pub face: Rgb,
    /// Minute marks.
    pub minor_tick: Rgb,
    /// Five-minute marks.
    pub major_tick: Rgb,
    /// The configured-duration sector behind the fill.
    pub ghost: Rgb,
    /// The time-left sector.
    pub fill: Rgb,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self {
            face: Rgb(0x10, 0x10, 0x10),
            minor_tick: Rgb(0x58, 0x58, 0x58),
            major_tick: Rgb(0xc8, 0xc8, 0xc8),
            ghost: Rgb(0x4a, 0x1c, 0x1c),
            fill: Rgb(0xff, 0x44, 0x44),
        }
    }
}

impl GaugeStyle {
    /// The palette used while paused: the sectors at half brightness.
    pub fn paused(&self) -> Self {
        Self {
            ghost: self.ghost.dim(),
            fill: self.fill.dim(),
            ..self.clone()
        }
    }
}

/// Stateless radial gauge renderer.
#[derive(Debug, Clone, Default)]
pub struct Gauge {
    /// Palette for the running state. The paused palette is derived from it.
    pub style: GaugeStyle,
}

impl Gauge {
    /// Creates a renderer with a custom palette.
    pub fn with_style(style: GaugeStyle) -> Self {
        Self { style }
    }

    /// Produces the drawing commands for one frame.
    ///
    /// * `progress` - share of the configured duration left, `[0, 1]`
    /// * `max` - share of the full dial the configured duration spans, `[0, 1]`
    /// * `paused` - use the dimmed palette
    ///
    /// The fill sweeps `progress × max` of a turn, the ghost sweeps `max`.
    /// Out-of-range inputs are clamped and non-finite ones read as zero.
    pub fn render(&self, progress: f64, max: f64, paused: bool) -> Vec<DrawCommand> {
        let progress = unit(progress);
        let max = unit(max);
        let style = if paused {
            self.style.paused()
        } else {
            self.style.clone()
        };

        let mut cmds = Vec::with_capacity(3 + MINOR_TICKS + MAJOR_TICKS);
        cmds.push(DrawCommand::Disc {
            radius: 1.0,
            color: style.face,
        });

        let ghost = max * TAU;
        if ghost > 0.0 {
            cmds.push(DrawCommand::Sector {
                start: 0.0,
                sweep: ghost,
                radius: SECTOR_RADIUS,
                color: style.ghost,
            });
        }

        let fill = progress * max * TAU;
        if fill > 0.0 {
            cmds.push(DrawCommand::Sector {
                start: 0.0,
                sweep: fill,
                radius: SECTOR_RADIUS,
                color: style.fill,
            });
        }

        for i in 0..MINOR_TICKS {
            cmds.push(DrawCommand::Tick {
                angle: TAU * i as f64 / MINOR_TICKS as f64,
                inner: MINOR_TICK_INNER,
                outer: 1.0,
                width: MINOR_TICK_WIDTH,
                major: false,
                color: style.minor_tick,
            });
        }
        for i in 0..MAJOR_TICKS {
            cmds.push(DrawCommand::Tick {
                angle: TAU * i as f64 / MAJOR_TICKS as f64,
                inner: MAJOR_TICK_INNER,
                outer: 1.0,
                width: MAJOR_TICK_WIDTH,
                major: true,
                color: style.major_tick,
            });
        }

        cmds
    }
}

/// Renders with the default palette.
pub fn render(progress: f64, max: f64, paused: bool) -> Vec<DrawCommand> {
    Gauge::default().render(progress, max, paused)
}

fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sectors(cmds: &[DrawCommand]) -> Vec<(f64, Rgb)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Sector { sweep, color, .. } => Some((*sweep, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_rgb_hex_roundtrip() {
        assert_eq!(Rgb::from_hex("#ff4444"), Some(Rgb(0xff, 0x44, 0x44)));
        assert_eq!(Rgb::from_hex("0a0B0c"), Some(Rgb(0x0a, 0x0b, 0x0c)));
        assert_eq!(Rgb(1, 2, 255).hex(), "#0102ff");
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
    }

    #[test]
    fn test_tick_counts() {
        let cmds = render(0.3, 1.0, false);
        let minor = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Tick { major: false, .. }))
            .count();
        let major = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Tick { major: true, .. }))
            .count();
        assert_eq!(minor, 60);
        assert_eq!(major, 12);
    }

    #[test]
    fn test_face_drawn_first() {
        let cmds = render(0.0, 0.0, false);
        assert!(matches!(cmds[0], DrawCommand::Disc { radius, .. } if radius == 1.0));
    }

    #[test]
    fn test_fill_sweep_is_progress_times_max() {
        let cmds = render(0.25, 0.8, false);
        let s = sectors(&cmds);
        assert_eq!(s.len(), 2);
        assert!((s[0].0 - 0.8 * TAU).abs() < 1e-9);
        assert!((s[1].0 - 0.2 * TAU).abs() < 1e-9);
        assert_eq!(s[1].1, GaugeStyle::default().fill);
    }

    #[test]
    fn test_empty_sweeps_are_omitted() {
        assert!(sectors(&render(0.0, 0.5, false)).len() == 1);
        assert!(sectors(&render(1.0, 0.0, false)).is_empty());
    }

    #[test]
    fn test_inputs_are_clamped() {
        let s = sectors(&render(7.0, 2.0, false));
        assert!((s[1].0 - TAU).abs() < 1e-9);
        assert!(sectors(&render(f64::NAN, f64::INFINITY, false)).is_empty());
        assert!(sectors(&render(-1.0, 1.0, false)).len() == 1);
    }

    #[test]
    fn test_paused_is_dimmer() {
        let running = sectors(&render(0.5, 1.0, false));
        let paused = sectors(&render(0.5, 1.0, true));
        let brightness = |c: Rgb| c.0 as u32 + c.1 as u32 + c.2 as u32;
        assert!(brightness(paused[1].1) < brightness(running[1].1));
        assert!(brightness(paused[0].1) < brightness(running[0].1));
        assert_eq!(running[1].0, paused[1].0);
    }

    #[test]
    fn test_render_is_idempotent() {
        let gauge = Gauge::default();
        assert_eq!(gauge.render(0.42, 0.9, true), gauge.render(0.42, 0.9, true));
    }

    #[test]
    fn test_major_ticks_on_five_minute_marks() {
        let cmds = render(0.0, 0.0, false);
        let angles: Vec<f64> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Tick { angle, major: true, .. } => Some(*angle),
                _ => None,
            })
            .collect();
        assert_eq!(angles[0], 0.0);
        assert!((angles[3] - TAU / 4.0).abs() < 1e-9);
    }
}
