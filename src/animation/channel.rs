//! A single animated scalar value.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::easing::Curve;
use super::repeat::RepeatSpec;

/// Frame interval animations step on (the engine frame rate).
const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / crate::DEFAULT_FPS as u64);

/// How an animation on a channel ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The animation ran to its target.
    Completed,
    /// A snap or cancellation stopped it. The channel keeps whatever value
    /// it had reached; rolling back is the caller's responsibility.
    Interrupted,
}

impl AnimationOutcome {
    /// Returns `true` if the animation ran to completion.
    pub fn is_completed(self) -> bool {
        matches!(self, AnimationOutcome::Completed)
    }
}

#[derive(Debug)]
struct Shared {
    /// Bit pattern of the current f32 value.
    bits: AtomicU32,
    /// Bumped by every snap; an in-flight animation stops when it changes.
    epoch: AtomicU64,
}

/// A single scalar animated value (one per role: scale or alpha).
///
/// The controller's task tree is the only writer; the render path reads
/// [`current`](Self::current) each frame, lock-free. Cloning shares the
/// underlying value, so a clone handed to an animation task and a clone
/// held by a widget observe the same state.
///
/// Channels are created once per wave slot and persist across
/// enable/disable toggles - they are re-animated, never reallocated.
#[derive(Debug, Clone)]
pub struct AnimatedChannel {
    shared: Arc<Shared>,
    rest_value: f32,
}

impl AnimatedChannel {
    /// Creates a channel resting at `rest_value`.
    pub fn new(rest_value: f32) -> Self {
        Self {
            shared: Arc::new(Shared {
                bits: AtomicU32::new(rest_value.to_bits()),
                epoch: AtomicU64::new(0),
            }),
            rest_value,
        }
    }

    /// Current value, readable from the render path each frame.
    pub fn current(&self) -> f32 {
        f32::from_bits(self.shared.bits.load(Ordering::Acquire))
    }

    /// The value the channel returns to when idle.
    pub fn rest_value(&self) -> f32 {
        self.rest_value
    }

    /// Immediately sets the value with no transition, interrupting any
    /// in-flight animation on this channel.
    pub fn snap_to(&self, value: f32) {
        self.shared.epoch.fetch_add(1, Ordering::AcqRel);
        self.store(value);
    }

    /// Snaps back to the rest value.
    pub fn reset(&self) {
        self.snap_to(self.rest_value);
    }

    fn store(&self, value: f32) {
        self.shared.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Animates from the current value to `target` over `duration`,
    /// stepping once per frame under the given curve.
    ///
    /// Suspends until the target is reached. Returns
    /// [`AnimationOutcome::Interrupted`] if `cancel` fires or another task
    /// snaps the channel mid-flight; the value is left where it was.
    pub async fn animate_to(
        &self,
        target: f32,
        duration: Duration,
        curve: Curve,
        cancel: &CancellationToken,
    ) -> AnimationOutcome {
        if duration.is_zero() {
            self.store(target);
            return AnimationOutcome::Completed;
        }

        let epoch = self.shared.epoch.load(Ordering::Acquire);
        let from = self.current();
        let started = Instant::now();
        let mut frames = time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return AnimationOutcome::Interrupted,
                _ = frames.tick() => {}
            }
            // A snap happened since this animation started; never write a
            // stale frame over it.
            if self.shared.epoch.load(Ordering::Acquire) != epoch {
                return AnimationOutcome::Interrupted;
            }
            let elapsed = started.elapsed();
            let t = (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0);
            self.store(from + (target - from) * curve.apply(t));
            if elapsed >= duration {
                return AnimationOutcome::Completed;
            }
        }
    }

    /// Runs `spec.iterations` repetitions of [leading delay, snap to range
    /// start, animate to range end]. Restart mode only: every repetition
    /// begins back at `spec.value_range.start`.
    ///
    /// Suspends until all repetitions complete or `cancel` fires.
    pub async fn animate_repeating(
        &self,
        spec: &RepeatSpec,
        curve: Curve,
        cancel: &CancellationToken,
    ) -> AnimationOutcome {
        for _ in 0..spec.iterations {
            if !spec.iteration_delay.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => return AnimationOutcome::Interrupted,
                    _ = time::sleep(spec.iteration_delay) => {}
                }
            }
            self.snap_to(spec.value_range.start);
            let outcome = self
                .animate_to(spec.value_range.end, spec.iteration_duration, curve, cancel)
                .await;
            if !outcome.is_completed() {
                return outcome;
            }
        }
        AnimationOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::repeat::ValueRange;

    #[test]
    fn test_channel_starts_at_rest() {
        let channel = AnimatedChannel::new(1.0);
        assert_eq!(channel.current(), 1.0);
        assert_eq!(channel.rest_value(), 1.0);
    }

    #[test]
    fn test_snap_and_reset() {
        let channel = AnimatedChannel::new(1.0);
        channel.snap_to(3.5);
        assert_eq!(channel.current(), 3.5);
        channel.reset();
        assert_eq!(channel.current(), 1.0);
    }

    #[test]
    fn test_clones_share_state() {
        let channel = AnimatedChannel::new(0.0);
        let clone = channel.clone();
        channel.snap_to(2.0);
        assert_eq!(clone.current(), 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_to_reaches_target() {
        let channel = AnimatedChannel::new(1.0);
        let cancel = CancellationToken::new();
        let outcome = channel
            .animate_to(1.4, Duration::from_millis(200), Curve::Linear, &cancel)
            .await;
        assert_eq!(outcome, AnimationOutcome::Completed);
        assert_eq!(channel.current(), 1.4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_to_zero_duration_completes_synchronously() {
        let channel = AnimatedChannel::new(1.0);
        let cancel = CancellationToken::new();
        let outcome = channel
            .animate_to(2.0, Duration::ZERO, Curve::Linear, &cancel)
            .await;
        assert_eq!(outcome, AnimationOutcome::Completed);
        assert_eq!(channel.current(), 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_leaves_partial_value() {
        let channel = AnimatedChannel::new(0.0);
        let cancel = CancellationToken::new();
        let worker = {
            let channel = channel.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                channel
                    .animate_to(10.0, Duration::from_millis(1000), Curve::Linear, &cancel)
                    .await
            })
        };
        time::sleep(Duration::from_millis(250)).await;
        cancel.cancel();
        let outcome = worker.await.unwrap();
        assert_eq!(outcome, AnimationOutcome::Interrupted);
        // Partial progress is not rolled back by the animation itself.
        let value = channel.current();
        assert!(value > 0.0 && value < 10.0, "value = {value}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_snap_interrupts_in_flight_animation() {
        let channel = AnimatedChannel::new(0.0);
        let cancel = CancellationToken::new();
        let worker = {
            let channel = channel.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                channel
                    .animate_to(10.0, Duration::from_millis(1000), Curve::Linear, &cancel)
                    .await
            })
        };
        time::sleep(Duration::from_millis(100)).await;
        channel.snap_to(0.5);
        let outcome = worker.await.unwrap();
        assert_eq!(outcome, AnimationOutcome::Interrupted);
        // The snapped value wins; the dead animation never writes again.
        assert_eq!(channel.current(), 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_repeating_restarts_each_iteration() {
        let channel = AnimatedChannel::new(1.0);
        let cancel = CancellationToken::new();
        let spec = RepeatSpec {
            iterations: 3,
            iteration_duration: Duration::from_millis(100),
            iteration_delay: Duration::ZERO,
            value_range: ValueRange::new(1.0, 1.4),
        };
        let outcome = channel.animate_repeating(&spec, Curve::Linear, &cancel).await;
        assert_eq!(outcome, AnimationOutcome::Completed);
        // Final iteration lands on the range end; the cycle-end snap back
        // to rest belongs to the scheduler, not the channel.
        assert_eq!(channel.current(), 1.4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_repeating_honors_leading_delay() {
        let channel = AnimatedChannel::new(1.0);
        let cancel = CancellationToken::new();
        let spec = RepeatSpec {
            iterations: 2,
            iteration_duration: Duration::from_millis(100),
            iteration_delay: Duration::from_millis(50),
            value_range: ValueRange::new(1.0, 2.0),
        };
        let started = Instant::now();
        let outcome = channel.animate_repeating(&spec, Curve::Linear, &cancel).await;
        assert_eq!(outcome, AnimationOutcome::Completed);
        // Two iterations of (50ms delay + 100ms curve) each.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300), "elapsed = {elapsed:?}");
    }
}
