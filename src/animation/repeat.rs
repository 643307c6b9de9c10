//! Timing value types for repeated pulse patterns.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default scale range for duplicate overlays: rest size to 140%.
pub const DEFAULT_PULSE_RANGE: ValueRange = ValueRange::new(1.0, 1.4);

/// Default alpha range: fully visible to fully faded out.
pub const DEFAULT_ALPHA_RANGE: ValueRange = ValueRange::new(1.0, 0.0);

/// Number of outer repeats of the whole wave cycle.
///
/// `Infinite` is the sentinel for "loop until disabled"; it only ends via
/// external cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatCount {
    /// Run this many cycles, then stop and reset.
    Finite(u32),
    /// Loop until the controller is disabled.
    Infinite,
}

impl RepeatCount {
    /// True once `completed` cycles reach or exceed this count.
    pub fn reached(self, completed: u32) -> bool {
        match self {
            RepeatCount::Finite(n) => completed >= n,
            RepeatCount::Infinite => false,
        }
    }

    /// Returns `true` for the infinite sentinel.
    pub fn is_infinite(self) -> bool {
        matches!(self, RepeatCount::Infinite)
    }
}

impl From<u32> for RepeatCount {
    fn from(count: u32) -> Self {
        RepeatCount::Finite(count)
    }
}

/// Closed value range an animated channel travels through.
///
/// `start` doubles as the channel's rest value: every pulse restarts there
/// and the channel snaps back to it when the controller stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Value at the start of each pulse (and at rest).
    pub start: f32,
    /// Value the pulse animates toward.
    pub end: f32,
}

impl ValueRange {
    /// Creates a range from `start` to `end`.
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }
}

/// One bounded repeated timing pattern: how many pulses make up a cycle,
/// how long each pulse takes, and the lead-in delay before each pulse.
///
/// Repeat mode is always "restart from `value_range.start`" - never
/// reverse/ping-pong. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatSpec {
    /// Inner pulses per cycle (at least 1).
    pub iterations: u32,
    /// Duration of one pulse's curve.
    pub iteration_duration: Duration,
    /// Leading delay honored before each pulse's curve starts.
    pub iteration_delay: Duration,
    /// Range the value travels through, restarting at `start` each pulse.
    pub value_range: ValueRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_count_reached() {
        assert!(!RepeatCount::Finite(1).reached(0));
        assert!(RepeatCount::Finite(1).reached(1));
        assert!(RepeatCount::Finite(3).reached(4));
        assert!(!RepeatCount::Infinite.reached(u32::MAX));
    }

    #[test]
    fn test_repeat_count_from_u32() {
        assert_eq!(RepeatCount::from(5), RepeatCount::Finite(5));
        assert!(!RepeatCount::from(5).is_infinite());
        assert!(RepeatCount::Infinite.is_infinite());
    }

    #[test]
    fn test_default_ranges() {
        assert_eq!(DEFAULT_PULSE_RANGE.start, 1.0);
        assert_eq!(DEFAULT_PULSE_RANGE.end, 1.4);
        assert_eq!(DEFAULT_ALPHA_RANGE.start, 1.0);
        assert_eq!(DEFAULT_ALPHA_RANGE.end, 0.0);
    }
}
