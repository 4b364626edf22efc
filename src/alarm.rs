//! Alarm sounds.
//!
//! The timer component never plays sound itself. When a countdown reaches
//! zero it emits an [`AlarmMsg`](crate::timer::AlarmMsg) and the host
//! application decides what to do with it, typically ringing an [`Alarm`].
//! [`Bell`] is the terminal implementation: it writes the BEL control
//! character, which most terminals turn into a beep or a visual flash.

use crate::error::Result;
use log::warn;
use std::io::{self, Write};

/// Something that can sound the alarm.
pub trait Alarm {
    /// Plays the alarm once.
    fn ring(&mut self) -> Result<()>;
}

/// Terminal bell writing `BEL` to an output stream.
#[derive(Debug)]
pub struct Bell<W: Write> {
    out: W,
    repeat: usize,
}

impl Bell<io::Stdout> {
    /// A bell on standard output, ringing once.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Bell<W> {
    /// A bell on `out`, ringing once.
    pub fn new(out: W) -> Self {
        Self { out, repeat: 1 }
    }

    /// Rings `repeat` times per alarm. Zero silences the bell.
    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// The underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Alarm for Bell<W> {
    fn ring(&mut self) -> Result<()> {
        if self.repeat == 0 {
            return Ok(());
        }
        self.out.write_all(&vec![0x07; self.repeat])?;
        self.out.flush()?;
        Ok(())
    }
}

/// Rings `alarm`, logging instead of failing when the terminal refuses.
pub fn sound<A: Alarm + ?Sized>(alarm: &mut A) {
    if let Err(err) = alarm.ring() {
        warn!("could not sound alarm: {}", err);
    }
}
