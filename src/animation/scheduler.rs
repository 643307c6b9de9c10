//! Concurrent, staggered execution of one pulse cycle across all waves.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::channel::{AnimatedChannel, AnimationOutcome};
use super::easing::Curve;
use super::repeat::{RepeatSpec, ValueRange};

/// One animated duplicate layer: a scale channel and an alpha channel,
/// offset in start time by its position in the wave set.
#[derive(Debug, Clone)]
pub struct Wave {
    index: usize,
    scale: AnimatedChannel,
    alpha: AnimatedChannel,
}

impl Wave {
    fn new(index: usize, pulse_range: ValueRange, alpha_range: ValueRange) -> Self {
        Self {
            index,
            scale: AnimatedChannel::new(pulse_range.start),
            alpha: AnimatedChannel::new(alpha_range.start),
        }
    }

    /// 0-based position among the wave set.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current scale factor for this wave's duplicate.
    pub fn scale(&self) -> f32 {
        self.scale.current()
    }

    /// Current alpha factor for this wave's duplicate.
    pub fn alpha(&self) -> f32 {
        self.alpha.current()
    }

    pub(crate) fn scale_channel(&self) -> &AnimatedChannel {
        &self.scale
    }

    pub(crate) fn alpha_channel(&self) -> &AnimatedChannel {
        &self.alpha
    }

    /// Snaps both channels back to their rest values.
    pub(crate) fn reset(&self) {
        self.scale.reset();
        self.alpha.reset();
    }
}

/// Runs exactly one full cycle across a fixed set of waves.
///
/// The wave set is allocated once and persists for the scheduler's
/// lifetime; toggling the owning controller re-animates the same channels.
#[derive(Debug)]
pub struct WaveScheduler {
    waves: Arc<[Wave]>,
    scale_spec: RepeatSpec,
    alpha_spec: RepeatSpec,
    curve: Curve,
}

impl WaveScheduler {
    /// Builds the wave set. `waves_count` must be at least 1: the stagger
    /// computation divides by it.
    pub fn new(
        waves_count: usize,
        scale_spec: RepeatSpec,
        alpha_spec: RepeatSpec,
        curve: Curve,
    ) -> Self {
        assert!(waves_count >= 1, "waves_count must be at least 1");
        assert!(
            scale_spec.iterations >= 1 && alpha_spec.iterations >= 1,
            "iterations must be at least 1"
        );
        let waves: Vec<Wave> = (0..waves_count)
            .map(|i| Wave::new(i, scale_spec.value_range, alpha_spec.value_range))
            .collect();
        Self {
            waves: waves.into(),
            scale_spec,
            alpha_spec,
            curve,
        }
    }

    /// Shared handle to the wave set, for the render path.
    pub fn waves(&self) -> Arc<[Wave]> {
        Arc::clone(&self.waves)
    }

    /// Number of waves in the set.
    pub fn waves_count(&self) -> usize {
        self.waves.len()
    }

    /// Start offset for wave `index`: `index * (iteration_duration /
    /// waves_count)`, in whole milliseconds. Always zero for a single wave.
    pub fn stagger_delay(&self, index: usize) -> Duration {
        let per_wave_ms =
            self.scale_spec.iteration_duration.as_millis() as u64 / self.waves.len() as u64;
        Duration::from_millis(index as u64 * per_wave_ms)
    }

    /// Snaps every channel in every wave back to its range start.
    pub fn reset_waves(&self) {
        for wave in self.waves.iter() {
            wave.reset();
        }
    }

    /// Runs one full cycle: two concurrent tasks per wave (scale and
    /// alpha), each delayed by the wave's stagger, then joined.
    ///
    /// All futures are built before any is polled, so stagger delays are
    /// measured from a common start instant. The call completes only when
    /// every one of the `2 * waves_count` tasks has finished - no wave
    /// observably outlives another across this boundary.
    pub async fn run_one_cycle(&self, cancel: &CancellationToken) -> AnimationOutcome {
        let tasks: Vec<_> = self
            .waves
            .iter()
            .flat_map(|wave| {
                let stagger = self.stagger_delay(wave.index());
                [
                    drive_channel(wave.scale_channel(), &self.scale_spec, stagger, self.curve, cancel),
                    drive_channel(wave.alpha_channel(), &self.alpha_spec, stagger, self.curve, cancel),
                ]
            })
            .collect();
        let outcomes = join_all(tasks).await;
        trace!(waves = self.waves.len(), "wave cycle joined");
        if outcomes.iter().all(|outcome| outcome.is_completed()) {
            AnimationOutcome::Completed
        } else {
            AnimationOutcome::Interrupted
        }
    }
}

/// Drives one channel through its share of a cycle: stagger wait, snap to
/// range start, the repeating pulse, and the end-of-cycle snap back to
/// range start (applied to both scale and alpha channels, so the duplicate
/// sits exactly under the live content between cycles).
async fn drive_channel(
    channel: &AnimatedChannel,
    spec: &RepeatSpec,
    stagger: Duration,
    curve: Curve,
    cancel: &CancellationToken,
) -> AnimationOutcome {
    if !stagger.is_zero() {
        tokio::select! {
            _ = cancel.cancelled() => return AnimationOutcome::Interrupted,
            _ = time::sleep(stagger) => {}
        }
    }
    channel.snap_to(spec.value_range.start);
    let outcome = channel.animate_repeating(spec, curve, cancel).await;
    if outcome.is_completed() {
        channel.snap_to(spec.value_range.start);
    }
    outcome
}
