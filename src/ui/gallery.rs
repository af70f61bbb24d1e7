//! Gallery view: an empty stage where every click rains media tiles.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Widget},
};

use super::layout::point_in_rect;
use super::particles::ParticleLayer;
use super::theme::Theme;
use crate::core::effects::Particle;

pub struct GalleryView<'a> {
    pub particles: &'a [Particle],
    pub now: Instant,
    /// Last mouse position; draws the cursor ring when inside the stage.
    pub pointer: Option<(u16, u16)>,
    pub tick: u64,
}

impl Widget for GalleryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" GALLERY ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        block.render(area, buf);

        if self.particles.is_empty() && area.height > 2 {
            // Blink the prompt every few ticks.
            let style = if (self.tick / 5) % 2 == 0 {
                Theme::headline_style()
            } else {
                Theme::muted_style()
            };
            let prompt = Line::styled("TAP ANYWHERE", style);
            let width = prompt.width() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            let y = area.y + area.height / 2;
            buf.set_line(x, y, &prompt, width.min(area.width));
        }

        ParticleLayer {
            particles: self.particles,
            now: self.now,
        }
        .render(area, buf);

        if let Some((col, row)) = self.pointer {
            if point_in_rect(area, col, row) {
                buf.set_string(
                    col,
                    row,
                    "◯",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}
