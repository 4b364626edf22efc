//! Terminal drawing surface for the gauge.
//!
//! A [`Canvas`] is a grid of terminal cells, each split into an upper and a
//! lower pixel with the half-block characters `▀` and `▄`. Terminal cells are
//! roughly twice as tall as they are wide, so the resulting pixels are close
//! to square and the dial comes out round.
//!
//! Drawing is a two step affair: [`Canvas::draw`] rasterizes a list of
//! [`DrawCommand`]s into the pixel buffer, and [`Canvas::view`] turns the
//! buffer into a styled string. Pixels no command touched are left
//! transparent and show the terminal background.
//!
//! ```rust
//! use bubbletea_dialtimer::canvas::Canvas;
//! use bubbletea_dialtimer::gauge;
//!
//! let mut canvas = Canvas::new(20, 10);
//! canvas.draw(&gauge::render(0.5, 1.0, false));
//!
//! let view = canvas.view();
//! assert_eq!(view.lines().count(), 10);
//! ```

use crate::gauge::{DrawCommand, Rgb};
use lipgloss_extras::prelude::*;
use std::f64::consts::TAU;

/// Half-block pixel buffer sized in terminal cells.
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    pixels: Vec<Option<Rgb>>,
}

impl Canvas {
    /// Creates an empty canvas of `cols` × `rows` terminal cells.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            pixels: vec![None; cols * rows * 2],
        }
    }

    /// Width in terminal cells.
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Height in terminal cells.
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Changes the size and clears the buffer.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.pixels = vec![None; cols * rows * 2];
    }

    /// Makes every pixel transparent.
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = None);
    }

    /// Color of the pixel at (`x`, `y`), where `y` counts half-cells.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.cols || y >= self.rows * 2 {
            return None;
        }
        self.pixels[y * self.cols + x]
    }

    /// Clears the buffer and paints `cmds` in order.
    pub fn draw(&mut self, cmds: &[DrawCommand]) {
        self.clear();
        let radius = self.radius();
        if radius <= 0.0 {
            return;
        }

        for y in 0..self.rows * 2 {
            for x in 0..self.cols {
                let (px, py) = self.to_dial(x as f64 + 0.5, y as f64 + 0.5);
                for cmd in cmds {
                    if let Some(color) = hit(cmd, px, py, radius) {
                        self.pixels[y * self.cols + x] = Some(color);
                    }
                }
            }
        }
    }

    /// Renders the buffer, one line per cell row.
    pub fn view(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut line = String::new();
            for col in 0..self.cols {
                let top = self.pixel(col, row * 2);
                let bottom = self.pixel(col, row * 2 + 1);
                line.push_str(&cell(top, bottom));
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Angle and normalized radius of the cell at (`col`, `row`).
    ///
    /// The angle is in radians clockwise from twelve o'clock; a radius of
    /// `1.0` is the rim of the dial.
    pub fn point_at(&self, col: usize, row: usize) -> (f64, f64) {
        let (x, y) = self.to_dial(col as f64 + 0.5, row as f64 * 2.0 + 1.0);
        (angle_of(x, y), (x * x + y * y).sqrt())
    }

    /// Angle of the cell at (`col`, `row`), or `None` outside the dial.
    pub fn angle_at(&self, col: usize, row: usize) -> Option<f64> {
        let (angle, radius) = self.point_at(col, row);
        if radius <= 1.0 && self.radius() > 0.0 {
            Some(angle)
        } else {
            None
        }
    }

    /// Normalized radius of the cell at (`col`, `row`).
    pub fn radius_at(&self, col: usize, row: usize) -> f64 {
        self.point_at(col, row).1
    }

    fn radius(&self) -> f64 {
        (self.cols.min(self.rows * 2) as f64 / 2.0 - 0.5).max(0.0)
    }

    fn to_dial(&self, x: f64, y: f64) -> (f64, f64) {
        let radius = self.radius().max(f64::EPSILON);
        let cx = self.cols as f64 / 2.0;
        let cy = self.rows as f64;
        ((x - cx) / radius, (y - cy) / radius)
    }
}

// Clockwise from twelve o'clock with y pointing down.
fn angle_of(x: f64, y: f64) -> f64 {
    let a = x.atan2(-y);
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

fn hit(cmd: &DrawCommand, x: f64, y: f64, pixel_radius: f64) -> Option<Rgb> {
    let r = (x * x + y * y).sqrt();
    match cmd {
        DrawCommand::Disc { radius, color } => (r <= *radius).then_some(*color),
        DrawCommand::Sector {
            start,
            sweep,
            radius,
            color,
        } => {
            if r > *radius {
                return None;
            }
            if *sweep >= TAU {
                return Some(*color);
            }
            let offset = (angle_of(x, y) - start).rem_euclid(TAU);
            (offset < *sweep).then_some(*color)
        }
        DrawCommand::Tick {
            angle,
            inner,
            outer,
            width,
            color,
            ..
        } => {
            let (dx, dy) = (angle.sin(), -angle.cos());
            let along = (x * dx + y * dy).clamp(*inner, *outer);
            let (ex, ey) = (x - along * dx, y - along * dy);
            let half = (width / 2.0).max(0.35 / pixel_radius);
            ((ex * ex + ey * ey).sqrt() <= half).then_some(*color)
        }
    }
}

fn cell(top: Option<Rgb>, bottom: Option<Rgb>) -> String {
    match (top, bottom) {
        (None, None) => " ".to_string(),
        (Some(t), None) => Style::new()
            .foreground(Color::from(t.hex().as_str()))
            .render("▀"),
        (None, Some(b)) => Style::new()
            .foreground(Color::from(b.hex().as_str()))
            .render("▄"),
        (Some(t), Some(b)) if t == b => Style::new()
            .foreground(Color::from(t.hex().as_str()))
            .render("█"),
        (Some(t), Some(b)) => Style::new()
            .foreground(Color::from(t.hex().as_str()))
            .background(Color::from(b.hex().as_str()))
            .render("▀"),
    }
}
