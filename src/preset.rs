//! Named pulsation presets and their resolution to concrete parameters.
//!
//! A [`PulsationType`] is pure configuration: a closed set of variants
//! that resolve, via [`PulsationType::resolve`], to the canonical
//! [`PulsationParams`] the controller runs with. Resolution is a pure
//! function - the same preset always yields the same parameters.

use std::time::Duration;

use ratatui::style::Color;
use thiserror::Error;

use crate::animation::{
    Curve, DEFAULT_ALPHA_RANGE, DEFAULT_PULSE_RANGE, RepeatCount, RepeatSpec, ValueRange,
};

/// How a duplicate overlay is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Solid block of the given color.
    Colored(Color),
    /// Horizontal two-stop gradient between the given colors.
    Gradient(Color, Color),
    /// Re-render the live content itself as the duplicate.
    #[default]
    ContentTwin,
}

/// One smooth pulse per repeat cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    /// Outer repeats before auto-stop.
    pub repeats_count: RepeatCount,
    /// Duration of one pulse in milliseconds.
    pub duration_ms: u64,
    /// Pause between repeat cycles in milliseconds.
    pub delay_between_repeats_ms: u64,
    /// Duplicate rendering mode.
    pub render_mode: RenderMode,
    /// Scale range for the duplicates.
    pub pulse_range: ValueRange,
    /// Alpha range for the duplicates.
    pub alpha_range: ValueRange,
}

impl Default for Linear {
    fn default() -> Self {
        Self {
            repeats_count: RepeatCount::Infinite,
            duration_ms: 500,
            delay_between_repeats_ms: 0,
            render_mode: RenderMode::ContentTwin,
            pulse_range: DEFAULT_PULSE_RANGE,
            alpha_range: DEFAULT_ALPHA_RANGE,
        }
    }
}

/// Bursts of several inner pulses per repeat cycle, then a pause.
#[derive(Debug, Clone, PartialEq)]
pub struct Iterative {
    /// Outer repeats before auto-stop.
    pub repeats_count: RepeatCount,
    /// Inner pulses per repeat cycle.
    pub iterations: u32,
    /// Duration of one inner pulse in milliseconds.
    pub iteration_duration_ms: u64,
    /// Leading delay before each inner pulse in milliseconds.
    pub iteration_delay_ms: u64,
    /// Pause between repeat cycles in milliseconds.
    pub delay_between_repeats_ms: u64,
    /// Duplicate rendering mode.
    pub render_mode: RenderMode,
    /// Scale range for the duplicates.
    pub pulse_range: ValueRange,
    /// Alpha range for the duplicates.
    pub alpha_range: ValueRange,
}

impl Default for Iterative {
    fn default() -> Self {
        Self {
            repeats_count: RepeatCount::Infinite,
            iterations: 3,
            iteration_duration_ms: 500,
            iteration_delay_ms: 0,
            delay_between_repeats_ms: 500,
            render_mode: RenderMode::ContentTwin,
            pulse_range: DEFAULT_PULSE_RANGE,
            alpha_range: DEFAULT_ALPHA_RANGE,
        }
    }
}

/// Staggered traveling waves: each wave starts before the previous one
/// visually finishes.
///
/// Repeats are always infinite and the inter-iteration delay is always
/// zero for this preset - the staggering comes entirely from the
/// inter-wave start offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Races {
    /// Duration of one wave's pulse in milliseconds.
    pub duration_ms: u64,
    /// Number of staggered waves.
    pub waves_count: usize,
    /// Duplicate rendering mode.
    pub render_mode: RenderMode,
    /// Scale range for the duplicates.
    pub pulse_range: ValueRange,
    /// Alpha range for the duplicates.
    pub alpha_range: ValueRange,
}

impl Default for Races {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            waves_count: 5,
            render_mode: RenderMode::ContentTwin,
            pulse_range: DEFAULT_PULSE_RANGE,
            alpha_range: DEFAULT_ALPHA_RANGE,
        }
    }
}

/// Closed set of pulsation presets.
///
/// Construct with struct-update syntax over the defaults:
/// ```ignore
/// let preset = PulsationType::Linear(Linear { duration_ms: 2000, ..Default::default() });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PulsationType {
    /// One smooth pulse per repeat cycle.
    Linear(Linear),
    /// Bursts of inner pulses per repeat cycle.
    Iterative(Iterative),
    /// Staggered overlapping waves.
    Races(Races),
}

impl PulsationType {
    /// Resolves the preset to the canonical parameter set.
    pub fn resolve(&self) -> PulsationParams {
        match self {
            PulsationType::Linear(p) => PulsationParams {
                repeats_count: p.repeats_count,
                iterations: 1,
                iteration_duration: Duration::from_millis(p.duration_ms),
                iteration_delay: Duration::ZERO,
                delay_between_repeats: Duration::from_millis(p.delay_between_repeats_ms),
                waves_count: 1,
                pulse_range: p.pulse_range,
                alpha_range: p.alpha_range,
                render_mode: p.render_mode,
                curve: Curve::Linear,
            },
            PulsationType::Iterative(p) => PulsationParams {
                repeats_count: p.repeats_count,
                iterations: p.iterations,
                iteration_duration: Duration::from_millis(p.iteration_duration_ms),
                iteration_delay: Duration::from_millis(p.iteration_delay_ms),
                delay_between_repeats: Duration::from_millis(p.delay_between_repeats_ms),
                waves_count: 1,
                pulse_range: p.pulse_range,
                alpha_range: p.alpha_range,
                render_mode: p.render_mode,
                curve: Curve::Linear,
            },
            PulsationType::Races(p) => PulsationParams {
                repeats_count: RepeatCount::Infinite,
                iterations: 1,
                iteration_duration: Duration::from_millis(p.duration_ms),
                iteration_delay: Duration::ZERO,
                delay_between_repeats: Duration::ZERO,
                waves_count: p.waves_count,
                pulse_range: p.pulse_range,
                alpha_range: p.alpha_range,
                render_mode: p.render_mode,
                curve: Curve::Linear,
            },
        }
    }
}

/// Fully expanded pulsation parameters, for callers that don't want a
/// named preset. This is what every preset resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct PulsationParams {
    /// Outer repeats of the whole wave cycle.
    pub repeats_count: RepeatCount,
    /// Inner pulses per cycle (at least 1).
    pub iterations: u32,
    /// Duration of one inner pulse.
    pub iteration_duration: Duration,
    /// Leading delay before each inner pulse.
    pub iteration_delay: Duration,
    /// Pause between repeat cycles, entered only after all waves joined.
    pub delay_between_repeats: Duration,
    /// Number of staggered waves (at least 1).
    pub waves_count: usize,
    /// Scale range for the duplicates.
    pub pulse_range: ValueRange,
    /// Alpha range for the duplicates.
    pub alpha_range: ValueRange,
    /// Duplicate rendering mode.
    pub render_mode: RenderMode,
    /// Timing curve for every pulse.
    pub curve: Curve,
}

impl PulsationParams {
    /// Checks the structural preconditions the animation math relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves_count == 0 {
            return Err(ConfigError::ZeroWaves);
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }

    /// Timing spec driving the scale channels.
    pub fn scale_spec(&self) -> RepeatSpec {
        RepeatSpec {
            iterations: self.iterations,
            iteration_duration: self.iteration_duration,
            iteration_delay: self.iteration_delay,
            value_range: self.pulse_range,
        }
    }

    /// Timing spec driving the alpha channels (same timing as scale, own
    /// value range).
    pub fn alpha_spec(&self) -> RepeatSpec {
        RepeatSpec {
            iterations: self.iterations,
            iteration_duration: self.iteration_duration,
            iteration_delay: self.iteration_delay,
            value_range: self.alpha_range,
        }
    }
}

/// Structurally invalid pulsation parameters.
///
/// These are misuse rather than runtime conditions; the infallible
/// constructors fail fast by panicking on them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Wave count of zero would divide by zero in the stagger computation.
    #[error("waves_count must be at least 1")]
    ZeroWaves,
    /// A cycle needs at least one inner pulse.
    #[error("iterations must be at least 1")]
    ZeroIterations,
}
