//! # tui-pulsation
//!
//! Pulsating duplicate-overlay animation for terminal UIs.
//!
//! Given an arbitrary piece of rendered content, this crate overlays one
//! or more animated duplicates that scale and fade outward in
//! configurable patterns, while the original content stays statically
//! visible on top.
//!
//! ## Core Components
//!
//! - **Animation**: the orchestration core - [`AnimatedChannel`],
//!   [`WaveScheduler`], and the [`PulsationController`] state machine
//!   that starts and stops the whole process from an `enabled` signal.
//! - **Presets**: [`PulsationType`] with three named patterns:
//!   - `Linear` - one smooth pulse per repeat cycle.
//!   - `Iterative` - bursts of N inner pulses, then a pause.
//!   - `Races` - staggered traveling waves that overlap in time.
//! - **Widgets**: the [`Pulsation`] ratatui widget that paints the
//!   duplicates beneath the live content each frame.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ratatui::style::Color;
//! use tui_pulsation::{
//!     Pulsation, PulsationController, PulsationType, Races, RenderMode,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut controller = PulsationController::new(&PulsationType::Races(Races {
//!         duration_ms: 2500,
//!         render_mode: RenderMode::Colored(Color::Green),
//!         ..Default::default()
//!     }));
//!     controller.enable();
//!
//!     // In the render loop, each frame:
//!     // frame.render_widget(
//!     //     Pulsation::new(&controller, badge).with_content_size(12, 3),
//!     //     area,
//!     // );
//!
//!     // On the enabled signal flipping false (or teardown):
//!     controller.disable().await;
//!     Ok(())
//! }
//! ```
//!
//! The controller owns a background tokio task tree that steps every
//! wave's scale and alpha channels on the frame clock; the render path
//! only ever reads the current values. Disabling cancels the tree
//! cooperatively and always leaves every channel at its rest value.

pub mod animation;
pub mod preset;
pub mod widgets;

pub use animation::{
    AnimatedChannel, AnimationOutcome, Curve, DEFAULT_ALPHA_RANGE, DEFAULT_PULSE_RANGE,
    PulsationController, RepeatCount, RepeatSpec, RunState, ValueRange, Wave, WaveScheduler,
    ease_in_out, interpolate_color,
};
pub use preset::{
    ConfigError, Iterative, Linear, PulsationParams, PulsationType, Races, RenderMode,
};
pub use widgets::Pulsation;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frames per second the animation channels step at.
pub const DEFAULT_FPS: u32 = 120;
