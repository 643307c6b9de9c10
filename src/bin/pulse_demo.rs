//! Sample screen showing the pulsation presets side by side.
//!
//! Keys: `space` toggles the enabled signal for all three, `q` quits.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Color,
    widgets::Widget,
};
use tui_pulsation::{
    Iterative, Linear, Pulsation, PulsationController, PulsationType, Races, RenderMode,
};

/// Solid-colored badge used as the pulsating content.
#[derive(Debug, Clone)]
struct Badge {
    color: Color,
}

impl Widget for Badge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ').set_bg(self.color);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut terminal = ratatui::init();

    let mut races = PulsationController::new(&PulsationType::Races(Races {
        duration_ms: 2500,
        render_mode: RenderMode::Colored(Color::Rgb(0, 180, 90)),
        ..Default::default()
    }));
    let mut linear = PulsationController::new(&PulsationType::Linear(Linear {
        duration_ms: 2000,
        delay_between_repeats_ms: 1000,
        render_mode: RenderMode::Gradient(Color::Rgb(40, 80, 220), Color::Rgb(160, 40, 220)),
        ..Default::default()
    }));
    let mut iterative = PulsationController::new(&PulsationType::Iterative(Iterative {
        iterations: 5,
        iteration_duration_ms: 1000,
        delay_between_repeats_ms: 2000,
        ..Default::default()
    }));

    let mut enabled = true;
    races.enable();
    linear.enable();
    iterative.enable();

    loop {
        terminal.draw(|frame| {
            let [left, middle, right] =
                Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(frame.area());
            frame.render_widget(
                Pulsation::new(&races, Badge { color: Color::Rgb(220, 200, 0) })
                    .with_content_size(12, 5),
                left,
            );
            frame.render_widget(
                Pulsation::new(&linear, Badge { color: Color::Rgb(40, 80, 220) })
                    .with_content_size(12, 5),
                middle,
            );
            frame.render_widget(
                Pulsation::new(&iterative, Badge { color: Color::Rgb(0, 180, 90) })
                    .with_content_size(12, 5),
                right,
            );
        })?;

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        enabled = !enabled;
                        races.set_enabled(enabled).await;
                        linear.set_enabled(enabled).await;
                        iterative.set_enabled(enabled).await;
                    }
                    _ => {}
                }
            }
        }
    }

    races.shutdown().await;
    linear.shutdown().await;
    iterative.shutdown().await;
    ratatui::restore();
    Ok(())
}
