//! Enable/disable state machine that owns the pulsation run loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::preset::{ConfigError, PulsationParams, PulsationType};

use super::channel::AnimationOutcome;
use super::repeat::RepeatCount;
use super::scheduler::{Wave, WaveScheduler};

/// Lifecycle state of a [`PulsationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run loop active; all channels at rest.
    Idle,
    /// The background run loop is animating the waves.
    Running,
    /// Disable was requested; cancellation is propagating.
    Stopping,
}

impl RunState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunState::Running,
            2 => RunState::Stopping,
            _ => RunState::Idle,
        }
    }
}

/// Top-level pulsation state machine.
///
/// Bound to the host's `enabled` signal through the edge-triggered
/// [`enable`](Self::enable) / [`disable`](Self::disable) hooks: call them
/// on transitions of the signal, not every frame. Enabling starts the
/// wave loop as a cancellable background task; disabling cancels the whole
/// task tree cooperatively and guarantees every channel is back at its
/// rest value before the controller reports [`RunState::Idle`].
///
/// Re-enabling after a stop restarts from zero completed cycles and
/// range-start values; no animation state survives a disable/enable cycle.
///
/// # Example
/// ```ignore
/// use tui_pulsation::{PulsationController, PulsationType, Races};
///
/// let mut controller = PulsationController::new(
///     &PulsationType::Races(Races { duration_ms: 2500, ..Default::default() }),
/// );
/// controller.enable();
/// // ... render controller.waves() each frame ...
/// controller.disable().await;
/// ```
#[derive(Debug)]
pub struct PulsationController {
    params: PulsationParams,
    scheduler: Arc<WaveScheduler>,
    waves: Arc<[Wave]>,
    state: Arc<AtomicU8>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PulsationController {
    /// Creates a controller for a named preset.
    pub fn new(preset: &PulsationType) -> Self {
        Self::with_params(preset.resolve())
    }

    /// Creates a controller from fully expanded parameters.
    ///
    /// Invalid parameters (zero waves, zero iterations) are a programming
    /// error and panic; use [`try_with_params`](Self::try_with_params) to
    /// get a `Result` instead.
    pub fn with_params(params: PulsationParams) -> Self {
        match Self::try_with_params(params) {
            Ok(controller) => controller,
            Err(err) => panic!("invalid pulsation parameters: {err}"),
        }
    }

    /// Fallible variant of [`with_params`](Self::with_params).
    pub fn try_with_params(params: PulsationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let scheduler = Arc::new(WaveScheduler::new(
            params.waves_count,
            params.scale_spec(),
            params.alpha_spec(),
            params.curve,
        ));
        let waves = scheduler.waves();
        Ok(Self {
            params,
            scheduler,
            waves,
            state: Arc::new(AtomicU8::new(RunState::Idle as u8)),
            cancel: CancellationToken::new(),
            task: None,
        })
    }

    /// The resolved parameters this controller runs with.
    pub fn params(&self) -> &PulsationParams {
        &self.params
    }

    /// The wave set, for the render path. Fixed size for the controller's
    /// lifetime; values change only while the run loop is active.
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// Current lifecycle state.
    pub fn run_state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Edge-triggered hook for the host's `enabled` signal.
    pub async fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable().await;
        }
    }

    /// Starts the wave loop as a background task. No-op while a run is
    /// already active; a fresh run always starts from zero completed
    /// cycles and range-start values.
    pub fn enable(&mut self) {
        if self.run_state() != RunState::Idle {
            return;
        }
        let cancel = CancellationToken::new();
        self.cancel = cancel.clone();
        self.state.store(RunState::Running as u8, Ordering::Release);

        let scheduler = Arc::clone(&self.scheduler);
        let repeats = self.params.repeats_count;
        let delay = self.params.delay_between_repeats;
        let state = Arc::clone(&self.state);
        debug!(
            waves = scheduler.waves_count(),
            infinite = repeats.is_infinite(),
            "pulsation enabled"
        );
        self.task = Some(tokio::spawn(async move {
            run_loop(&scheduler, repeats, delay, &cancel).await;
            state.store(RunState::Idle as u8, Ordering::Release);
        }));
    }

    /// Cancels the run loop, waits for the cancellation to settle, and
    /// returns with every channel snapped back to its rest value.
    ///
    /// No-op when already idle (a finished run has reset the waves on its
    /// way out).
    pub async fn disable(&mut self) {
        if self.run_state() == RunState::Idle {
            return;
        }
        self.state.store(RunState::Stopping as u8, Ordering::Release);
        debug!("pulsation disabled, cancelling run loop");
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            // The task's epilogue performs the rest-state snap before it
            // finishes, so the invariant holds once this await resolves.
            let _ = task.await;
        }
        self.state.store(RunState::Idle as u8, Ordering::Release);
    }

    /// Tears the controller down: same guarantees as
    /// [`disable`](Self::disable).
    pub async fn shutdown(&mut self) {
        self.disable().await;
    }
}

impl Drop for PulsationController {
    fn drop(&mut self) {
        // Let a still-running task tree wind down cooperatively.
        self.cancel.cancel();
    }
}

/// The outer repeat loop: run one full cycle, count it, and either stop
/// (count reached, or cancelled) or wait out the inter-repeat delay and go
/// again. Every exit path leaves the visible state at rest, exactly once.
async fn run_loop(
    scheduler: &WaveScheduler,
    repeats: RepeatCount,
    delay_between_repeats: Duration,
    cancel: &CancellationToken,
) {
    let mut completed_cycles: u32 = 0;
    loop {
        if scheduler.run_one_cycle(cancel).await == AnimationOutcome::Interrupted {
            break;
        }
        completed_cycles += 1;
        trace!(completed_cycles, "pulsation cycle complete");
        if repeats.reached(completed_cycles) {
            break;
        }
        // The delay starts only after ALL waves of the cycle have joined.
        if delay_between_repeats.is_zero() {
            if cancel.is_cancelled() {
                break;
            }
        } else {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = time::sleep(delay_between_repeats) => {}
            }
        }
    }
    scheduler.reset_waves();
}
