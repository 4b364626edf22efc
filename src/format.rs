//! Clock-face formatting and duration parsing.
//!
//! The readout under the dial is always `MM:SS`. Countdowns round the
//! remaining time up so a fresh two minute timer reads `02:00` for its whole
//! first second and only shows `00:00` once it has actually expired.
//! Stopwatches round the elapsed time down, like a wall clock.

use crate::error::{Error, Result};
use std::time::Duration;

/// Upper bound for every duration in the crate: one full turn of the dial.
pub const MAX_DURATION: Duration = Duration::from_secs(3600);

/// Formats whole seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so `3600` renders as `60:00`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_dialtimer::format::format_seconds;
///
/// assert_eq!(format_seconds(0), "00:00");
/// assert_eq!(format_seconds(125), "02:05");
/// assert_eq!(format_seconds(3600), "60:00");
/// ```
pub fn format_seconds(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Formats a remaining countdown, rounding partial seconds up.
pub fn format_remaining(d: Duration) -> String {
    let mut secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs += 1;
    }
    format_seconds(secs)
}

/// Formats elapsed stopwatch time, rounding partial seconds down.
pub fn format_elapsed(d: Duration) -> String {
    format_seconds(d.as_secs())
}

/// Keeps only the characters a duration field accepts.
///
/// Digits pass through, the first colon is kept and later ones dropped, and
/// the result is truncated to `max_len` characters.
///
/// # Examples
///
/// ```rust
/// use bubbletea_dialtimer::format::sanitize_input;
///
/// assert_eq!(sanitize_input("1a:3:0", 5), "1:30");
/// assert_eq!(sanitize_input("123456", 5), "12345");
/// ```
pub fn sanitize_input(raw: &str, max_len: usize) -> String {
    let mut seen_colon = false;
    raw.chars()
        .filter(|c| {
            if c.is_ascii_digit() {
                return true;
            }
            if *c == ':' && !seen_colon {
                seen_colon = true;
                return true;
            }
            false
        })
        .take(max_len)
        .collect()
}

/// Parses `MM`, `MM:SS` or `:SS` into a duration clamped to [`MAX_DURATION`].
///
/// A bare number is read as minutes. Seconds past 59 are carried into the
/// minutes rather than rejected. Input is sanitized first, so stray letters
/// are ignored; only text with no digits at all is an error.
///
/// # Examples
///
/// ```rust
/// use bubbletea_dialtimer::format::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("25").unwrap(), Duration::from_secs(25 * 60));
/// assert_eq!(parse_duration("1:30").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration(":45").unwrap(), Duration::from_secs(45));
/// assert_eq!(parse_duration("99").unwrap(), Duration::from_secs(3600));
/// assert!(parse_duration(":").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<Duration> {
    let clean = sanitize_input(text, usize::MAX);
    if !clean.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidDuration(text.to_string()));
    }

    let (minutes, seconds) = match clean.split_once(':') {
        Some((m, s)) => (parse_part(m), parse_part(s)),
        None => (parse_part(&clean), 0),
    };

    let total = minutes.saturating_mul(60).saturating_add(seconds);
    Ok(Duration::from_secs(total).min(MAX_DURATION))
}

// Empty halves of `MM:SS` count as zero; overlong runs of digits saturate.
fn parse_part(digits: &str) -> u64 {
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(59), "00:59");
        assert_eq!(format_seconds(60), "01:00");
        assert_eq!(format_seconds(3599), "59:59");
        assert_eq!(format_seconds(3600), "60:00");
    }

    #[test]
    fn test_format_remaining_rounds_up() {
        assert_eq!(format_remaining(Duration::from_millis(119_001)), "02:00");
        assert_eq!(format_remaining(Duration::from_millis(120_000)), "02:00");
        assert_eq!(format_remaining(Duration::from_millis(1)), "00:01");
        assert_eq!(format_remaining(Duration::ZERO), "00:00");
    }

    #[test]
    fn test_format_elapsed_rounds_down() {
        assert_eq!(format_elapsed(Duration::from_millis(999)), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(61_500)), "01:01");
    }

    #[test]
    fn test_sanitize_drops_letters_and_extra_colons() {
        assert_eq!(sanitize_input("abc", 5), "");
        assert_eq!(sanitize_input("12:34:56", 10), "12:3456");
        assert_eq!(sanitize_input(" 5 m", 5), "5");
        assert_eq!(sanitize_input("::7", 5), ":7");
    }

    #[test]
    fn test_parse_minutes_and_seconds() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("5").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2:05").unwrap(), Duration::from_secs(125));
        assert_eq!(parse_duration("10:").unwrap(), Duration::from_secs(600));
        assert_eq!(parse_duration("0:90").unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn test_parse_clamps_to_an_hour() {
        assert_eq!(parse_duration("61").unwrap(), MAX_DURATION);
        assert_eq!(parse_duration("59:99").unwrap(), MAX_DURATION);
        assert_eq!(parse_duration("99999999999999999999999").unwrap(), MAX_DURATION);
    }

    #[test]
    fn test_parse_rejects_text_without_digits() {
        assert!(matches!(parse_duration(""), Err(Error::InvalidDuration(_))));
        assert!(matches!(parse_duration("abc"), Err(Error::InvalidDuration(_))));
        assert!(matches!(parse_duration(":"), Err(Error::InvalidDuration(_))));
    }
}
