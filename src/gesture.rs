//! Mapping pointer gestures onto timer adjustments.
//!
//! Two gestures edit the timer. The mouse wheel steps the configured
//! duration in five minute notches while idle, snapping to the nearest notch
//! first when the duration sits between two of them; while a run is active
//! it shifts the time left by a fixed step instead. Dragging around the dial
//! points at a position on the clock face: the angle becomes a share of the
//! full hour.

use crate::format::MAX_DURATION;
use crate::viewmodel::TimerViewModel;
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Width of one wheel notch while idle.
pub const NOTCH: Duration = Duration::from_secs(5 * 60);

/// Direction of a wheel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    /// Wheel rolled away from the user; adds time.
    Up,
    /// Wheel rolled toward the user; removes time.
    Down,
}

/// Next duration after one wheel notch in `direction`.
///
/// A duration that is not a multiple of [`NOTCH`] snaps to the neighbouring
/// multiple in the wheel's direction; one that is moves a whole notch. The
/// result stays within `[0, 60]` minutes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_dialtimer::gesture::{wheel_step, WheelDirection};
/// use std::time::Duration;
///
/// let mins = |m: u64| Duration::from_secs(m * 60);
/// assert_eq!(wheel_step(mins(10), WheelDirection::Up), mins(15));
/// assert_eq!(wheel_step(mins(12), WheelDirection::Up), mins(15));
/// assert_eq!(wheel_step(mins(12), WheelDirection::Down), mins(10));
/// assert_eq!(wheel_step(mins(60), WheelDirection::Up), mins(60));
/// ```
pub fn wheel_step(current: Duration, direction: WheelDirection) -> Duration {
    let notch = NOTCH.as_secs();
    let secs = current.as_secs().min(MAX_DURATION.as_secs());
    let rem = secs % notch;

    let next = match direction {
        WheelDirection::Up if rem != 0 => secs + (notch - rem),
        WheelDirection::Up => secs + notch,
        WheelDirection::Down if rem != 0 => secs - rem,
        WheelDirection::Down => secs.saturating_sub(notch),
    };
    Duration::from_secs(next.min(MAX_DURATION.as_secs()))
}

/// Share of a full turn for an angle in radians, in `[0, 1)`.
pub fn angle_fraction(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    angle.rem_euclid(TAU) / TAU
}

/// Duration pointed at on the dial, rounded to whole minutes.
pub fn duration_at_angle(angle: f64) -> Duration {
    let minutes = (angle_fraction(angle) * 60.0).round() as u64;
    Duration::from_secs(minutes * 60).min(MAX_DURATION)
}

/// Time on the clock pointed at on the dial, rounded to whole seconds.
pub fn time_at_angle(angle: f64) -> Duration {
    let secs = (angle_fraction(angle) * MAX_DURATION.as_secs_f64()).round() as u64;
    Duration::from_secs(secs).min(MAX_DURATION)
}

/// Applies one wheel notch to the timer.
///
/// Idle timers step their duration by notches; active timers shift the time
/// left by `live_step`. Returns whether anything changed.
pub fn apply_wheel(
    vm: &mut TimerViewModel,
    direction: WheelDirection,
    live_step: Duration,
    now: Instant,
) -> bool {
    if vm.is_active() {
        let step = live_step.as_secs() as i64;
        let delta = match direction {
            WheelDirection::Up => step,
            WheelDirection::Down => -step,
        };
        return vm.adjust_time_left(delta, now);
    }

    let next = wheel_step(vm.duration(), direction);
    if next == vm.duration() && !vm.is_finished() {
        return false;
    }
    vm.set_duration(next)
}

/// Applies a drag to the dial position at `angle`.
///
/// Idle timers take the pointed-at duration; active timers take the
/// pointed-at time left as a live shift.
pub fn apply_drag(vm: &mut TimerViewModel, angle: f64, now: Instant) -> bool {
    if vm.is_active() {
        vm.set_time_left(time_at_angle(angle), now)
    } else {
        vm.set_duration(duration_at_angle(angle))
    }
}
