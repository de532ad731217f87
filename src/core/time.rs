//! Conversion from configured seconds to simulation time.

use std::time::Duration;

/// Configured seconds as a `Duration`, rounded to whole microseconds.
///
/// `f32` seconds are rarely exact (`0.6f32` is 600.000024 ms), and a timed
/// state compared against whole-millisecond ticks must not overrun by one.
/// Negative and NaN inputs map to zero, huge ones saturate.
pub fn duration_from_secs(secs: f32) -> Duration {
    let micros = (f64::from(secs.max(0.0)) * 1_000_000.0).round();
    Duration::from_micros(micros as u64)
}

/// `fraction` of `duration`, rounded the same way.
pub fn scale_duration(duration: Duration, fraction: f32) -> Duration {
    let micros = (duration.as_micros() as f64 * f64::from(fraction.clamp(0.0, 1.0))).round();
    Duration::from_micros(micros as u64)
}
