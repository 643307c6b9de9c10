//! Reusable UI components for the pulsation effect.

mod pulse;

pub use pulse::Pulsation;
