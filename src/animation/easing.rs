//! Timing curves and color interpolation.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Timing curve an animated value follows between its range endpoints.
///
/// Pulsation uses [`Curve::Linear`] throughout; [`Curve::EaseInOut`] is
/// available for callers that want softer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Curve {
    /// Constant-rate tween.
    #[default]
    Linear,
    /// Cubic ease-in-out.
    EaseInOut,
}

impl Curve {
    /// Maps raw progress (clamped to 0.0-1.0) through the curve.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::EaseInOut => ease_in_out(t),
        }
    }
}

/// Ease-in-out curve for smooth animation.
///
/// Uses a cubic bezier approximation for natural-feeling motion.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Interpolates between two colors based on a factor t (0.0 to 1.0).
///
/// Terminal cells have no opacity, so this is how the alpha channel is
/// applied: fade a duplicate's color toward the background color.
///
/// # Arguments
/// * `from` - Starting color (at t=0.0)
/// * `to` - Ending color (at t=1.0)
/// * `t` - Interpolation factor (clamped to 0.0-1.0)
pub fn interpolate_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);

    let (r1, g1, b1) = extract_rgb(from);
    let (r2, g2, b2) = extract_rgb(to);

    let r = lerp_u8(r1, r2, t);
    let g = lerp_u8(g1, g2, t);
    let b = lerp_u8(b1, b2, t);

    Color::Rgb(r, g, b)
}

/// Extracts RGB components from a Color, defaulting to white for non-RGB colors.
pub(crate) fn extract_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        _ => (255, 255, 255),
    }
}

/// Linear interpolation between two u8 values.
#[inline]
pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_curve_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_eq!(Curve::Linear.apply(t), t);
        }
    }

    #[test]
    fn test_curve_clamps_input() {
        assert_eq!(Curve::Linear.apply(-0.5), 0.0);
        assert_eq!(Curve::Linear.apply(1.5), 1.0);
        assert_eq!(Curve::EaseInOut.apply(-0.5), 0.0);
        assert!((Curve::EaseInOut.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ease_in_out() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert!((ease_in_out(1.0) - 1.0).abs() < 0.001);
        assert!((ease_in_out(0.5) - 0.5).abs() < 0.001);

        // Monotonic over the whole range
        let mut prev = 0.0;
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let val = ease_in_out(t);
            assert!(val >= prev);
            prev = val;
        }
    }

    #[test]
    fn test_interpolate_color() {
        let from = Color::Rgb(0, 0, 0);
        let to = Color::Rgb(100, 100, 100);

        assert_eq!(interpolate_color(from, to, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(interpolate_color(from, to, 1.0), Color::Rgb(100, 100, 100));
        assert_eq!(interpolate_color(from, to, 0.5), Color::Rgb(50, 50, 50));
    }

    #[test]
    fn test_interpolate_color_clamping() {
        let from = Color::Rgb(0, 0, 0);
        let to = Color::Rgb(100, 100, 100);

        assert_eq!(
            interpolate_color(from, to, -0.5),
            interpolate_color(from, to, 0.0)
        );
        assert_eq!(
            interpolate_color(from, to, 1.5),
            interpolate_color(from, to, 1.0)
        );
    }
}
