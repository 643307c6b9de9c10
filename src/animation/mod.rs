//! Animation orchestration for the pulsation effect.
//!
//! The timing/state model that drives N independent (scale, alpha)
//! animated values through repeatable, delayed, and staggered cycles:
//!
//! - [`AnimatedChannel`] - a single scalar animated value.
//! - [`RepeatSpec`] / [`RepeatCount`] / [`ValueRange`] - timing patterns.
//! - [`WaveScheduler`] / [`Wave`] - staggered fan-out/join of one cycle.
//! - [`PulsationController`] - the enable/disable state machine on top.
//!
//! All "concurrency" here is cooperative: tokio tasks stepping on the
//! frame clock. The controller's task tree is the only writer of channel
//! values; the render path reads them each frame.

mod channel;
mod controller;
pub mod easing;
mod repeat;
mod scheduler;

pub use channel::{AnimatedChannel, AnimationOutcome};
pub use controller::{PulsationController, RunState};
pub use easing::{Curve, ease_in_out, interpolate_color};
pub use repeat::{
    DEFAULT_ALPHA_RANGE, DEFAULT_PULSE_RANGE, RepeatCount, RepeatSpec, ValueRange,
};
pub use scheduler::{Wave, WaveScheduler};
