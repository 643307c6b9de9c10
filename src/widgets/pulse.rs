//! Pulsation overlay widget.
//!
//! Renders a piece of content once, normally, plus one animated duplicate
//! per wave beneath it. Each duplicate is sized by its wave's scale
//! channel and colored by its alpha channel - terminal cells have no
//! opacity, so alpha fades the duplicate's colors toward the background
//! color.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use crate::animation::{PulsationController, interpolate_color};
use crate::preset::RenderMode;

/// Pulsation animation that duplicates content and animates it under it.
///
/// The widget reads the current channel values from the controller each
/// frame; it never writes them. The content's cell size is consumed once
/// via [`with_content_size`](Self::with_content_size); when absent, the
/// content is sized so the largest duplicate still fits the render area.
///
/// # Example
/// ```ignore
/// use tui_pulsation::{Pulsation, PulsationController, PulsationType, Linear};
///
/// let pulsation = Pulsation::new(&controller, my_badge)
///     .with_content_size(12, 3)
///     .with_background(Color::Black);
/// frame.render_widget(pulsation, area);
/// ```
#[derive(Debug, Clone)]
pub struct Pulsation<'a, W> {
    controller: &'a PulsationController,
    content: W,
    content_size: Option<(u16, u16)>,
    background: Color,
}

impl<'a, W> Pulsation<'a, W> {
    /// Creates the widget for a controller and its content.
    pub fn new(controller: &'a PulsationController, content: W) -> Self {
        Self {
            controller,
            content,
            content_size: None,
            background: Color::Black,
        }
    }

    /// Sets the content's measured size in cells. Duplicates are sized
    /// from this, multiplied by their wave's scale factor.
    pub fn with_content_size(mut self, width: u16, height: u16) -> Self {
        self.content_size = Some((width, height));
        self
    }

    /// Sets the color faded toward as alpha approaches zero.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    fn base_size(&self, area: Rect) -> (u16, u16) {
        if let Some(size) = self.content_size {
            return size;
        }
        let range = self.controller.params().pulse_range;
        let max_scale = range.start.max(range.end).max(1.0);
        (
            (area.width as f32 / max_scale) as u16,
            (area.height as f32 / max_scale) as u16,
        )
    }
}

/// Rect of `base` cells scaled by `scale`, centered in `area` and clipped
/// to it.
fn scaled_rect(area: Rect, base: (u16, u16), scale: f32) -> Rect {
    let width = (base.0 as f32 * scale).round() as u16;
    let height = (base.1 as f32 * scale).round() as u16;
    let x = (area.x + area.width / 2).saturating_sub(width / 2);
    let y = (area.y + area.height / 2).saturating_sub(height / 2);
    Rect::new(x, y, width, height).intersection(area)
}

/// Fills a rect with a solid background color.
fn fill(buf: &mut Buffer, rect: Rect, color: Color) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }
}

/// Fades every colored cell in a rect toward the background color.
fn fade(buf: &mut Buffer, rect: Rect, background: Color, alpha: f32) {
    if alpha >= 1.0 {
        return;
    }
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let fg = cell.fg;
                if fg != Color::Reset {
                    cell.set_fg(interpolate_color(background, fg, alpha));
                }
                let bg = cell.bg;
                if bg != Color::Reset {
                    cell.set_bg(interpolate_color(background, bg, alpha));
                }
            }
        }
    }
}

impl<'a, W: Widget + Clone> Widget for Pulsation<'a, W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let base = self.base_size(area);
        let render_mode = self.controller.params().render_mode;

        for wave in self.controller.waves() {
            let duplicate = scaled_rect(area, base, wave.scale());
            if duplicate.is_empty() {
                continue;
            }
            let alpha = wave.alpha();
            match render_mode {
                RenderMode::Colored(color) => {
                    fill(buf, duplicate, interpolate_color(self.background, color, alpha));
                }
                RenderMode::Gradient(from, to) => {
                    for x in duplicate.left()..duplicate.right() {
                        let t = if duplicate.width > 1 {
                            (x - duplicate.x) as f32 / (duplicate.width - 1) as f32
                        } else {
                            0.0
                        };
                        let stop = interpolate_color(from, to, t);
                        let faded = interpolate_color(self.background, stop, alpha);
                        for y in duplicate.top()..duplicate.bottom() {
                            if let Some(cell) = buf.cell_mut((x, y)) {
                                cell.set_char(' ').set_bg(faded);
                            }
                        }
                    }
                }
                RenderMode::ContentTwin => {
                    self.content.clone().render(duplicate, buf);
                    fade(buf, duplicate, self.background, alpha);
                }
            }
        }

        // The live content always sits on top, unscaled and unfaded.
        let content_rect = scaled_rect(area, base, 1.0);
        self.content.render(content_rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ValueRange;
    use crate::preset::{Linear, PulsationType, Races};
    use crate::PulsationController;

    /// Solid-colored block used as test content.
    #[derive(Debug, Clone)]
    struct Swatch(Color);

    impl Widget for Swatch {
        fn render(self, area: Rect, buf: &mut Buffer) {
            fill(buf, area, self.0);
        }
    }

    #[test]
    fn test_scaled_rect_centers_and_clips() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = scaled_rect(area, (10, 4), 1.0);
        assert_eq!(rect, Rect::new(5, 3, 10, 4));

        // Scaled past the area, the rect clips to it.
        let rect = scaled_rect(area, (10, 4), 4.0);
        assert_eq!(rect, Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_scaled_rect_grows_with_scale() {
        let area = Rect::new(0, 0, 40, 20);
        let small = scaled_rect(area, (10, 4), 1.0);
        let large = scaled_rect(area, (10, 4), 1.4);
        assert!(large.width > small.width);
        // Nested rects: the larger duplicate fully contains the smaller.
        assert_eq!(large.union(small), large);
    }

    #[test]
    fn test_render_no_panic_at_rest() {
        let controller = PulsationController::new(&PulsationType::Races(Races::default()));
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        Pulsation::new(&controller, Swatch(Color::Rgb(200, 200, 0)))
            .with_content_size(8, 3)
            .render(area, &mut buf);
    }

    #[test]
    fn test_colored_duplicate_painted_under_content() {
        let controller = PulsationController::new(&PulsationType::Linear(Linear {
            render_mode: RenderMode::Colored(Color::Rgb(200, 0, 0)),
            ..Default::default()
        }));
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        Pulsation::new(&controller, Swatch(Color::Rgb(0, 0, 200)))
            .with_content_size(4, 1)
            .render(area, &mut buf);
        // At rest (scale 1.0) the duplicate sits exactly under the
        // content, so content cells win.
        let cell = buf.cell((5, 2)).unwrap();
        assert_eq!(cell.bg, Color::Rgb(0, 0, 200));
    }

    #[test]
    fn test_alpha_fades_toward_background() {
        // Alpha range fixed at 0.5 by making start == end == 0.5.
        let controller = PulsationController::new(&PulsationType::Linear(Linear {
            render_mode: RenderMode::Colored(Color::Rgb(200, 0, 0)),
            pulse_range: ValueRange::new(2.0, 2.0),
            alpha_range: ValueRange::new(0.5, 0.0),
            ..Default::default()
        }));
        let area = Rect::new(0, 0, 12, 6);
        let mut buf = Buffer::empty(area);
        Pulsation::new(&controller, Swatch(Color::Rgb(0, 0, 200)))
            .with_content_size(4, 2)
            .with_background(Color::Rgb(0, 0, 0))
            .render(area, &mut buf);
        // The duplicate is twice the content size, so its corner cells are
        // exposed; at alpha 0.5 the red is halved toward black.
        let cell = buf.cell((2, 1)).unwrap();
        assert_eq!(cell.bg, Color::Rgb(100, 0, 0));
    }

    #[test]
    fn test_gradient_varies_across_columns() {
        let controller = PulsationController::new(&PulsationType::Linear(Linear {
            render_mode: RenderMode::Gradient(Color::Rgb(0, 0, 0), Color::Rgb(200, 200, 200)),
            pulse_range: ValueRange::new(2.0, 2.0),
            ..Default::default()
        }));
        let area = Rect::new(0, 0, 12, 6);
        let mut buf = Buffer::empty(area);
        Pulsation::new(&controller, Swatch(Color::Rgb(0, 0, 200)))
            .with_content_size(4, 2)
            .render(area, &mut buf);
        let left = buf.cell((2, 1)).unwrap().bg;
        let right = buf.cell((9, 1)).unwrap().bg;
        assert_ne!(left, right);
    }
}
