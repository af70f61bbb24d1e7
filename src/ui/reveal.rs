//! Aarunya-ID reveal: a flippable player card under a confetti burst.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::layout::centered_fixed;
use super::particles::ParticleLayer;
use super::theme::Theme;
use crate::core::effects::Particle;
use crate::core::festival::FEST_NAME;
use crate::core::validation::AarunyaId;

const CARD_WIDTH: u16 = 46;
const CARD_HEIGHT: u16 = 12;
const BUTTON_WIDTH: u16 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealLayout {
    pub card: Rect,
    pub continue_button: Rect,
}

impl RevealLayout {
    pub fn compute(body: Rect) -> Self {
        let group = centered_fixed(CARD_WIDTH, CARD_HEIGHT + 4, body);
        let card = Rect::new(group.x, group.y, group.width, CARD_HEIGHT.min(group.height));
        let below = Rect::new(
            group.x,
            card.bottom() + 1,
            group.width,
            group.bottom().saturating_sub(card.bottom() + 1),
        );
        let continue_button = centered_fixed(BUTTON_WIDTH, 3, below);
        Self {
            card,
            continue_button,
        }
    }
}

pub struct RevealView<'a> {
    pub id: Option<&'a AarunyaId>,
    pub flipped: bool,
    pub particles: &'a [Particle],
    pub now: Instant,
}

impl Widget for RevealView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = RevealLayout::compute(area);
        let id = self.id.map(AarunyaId::as_str).unwrap_or("AR-??-????");

        Clear.render(layout.card, buf);
        let lines = if self.flipped {
            vec![
                Line::styled("SAVE THIS ID", Theme::label_style()),
                Line::raw(""),
                Line::styled("This is your unique Aarunya-ID.", Theme::text_style()),
                Line::styled("Use it to log in to future events.", Theme::text_style()),
                Line::raw(""),
                Line::styled(id.to_string(), Theme::label_style()),
                Line::raw(""),
                Line::styled("⚠ Do not share this ID with anyone", Theme::error_style()),
            ]
        } else {
            vec![
                Line::styled(format!("{FEST_NAME} PLAYER CARD"), Theme::accent_style()),
                Line::raw(""),
                Line::raw("🎮"),
                Line::styled("YOUR AARUNYA-ID", Theme::muted_style()),
                Line::raw(""),
                Line::styled(id.to_string(), Theme::headline_style()),
                Line::raw(""),
                Line::styled("click or press Space to flip", Theme::muted_style()),
            ]
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(if self.flipped { " BACK " } else { " FRONT " })
                    .title_style(Theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Theme::focus_border_style()),
            )
            .render(layout.card, buf);

        Paragraph::new(Line::styled("Continue", Theme::button_style(false)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Theme::border_style()),
            )
            .render(layout.continue_button, buf);

        ParticleLayer {
            particles: self.particles,
            now: self.now,
        }
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_sits_below_the_card() {
        let layout = RevealLayout::compute(Rect::new(0, 3, 100, 36));
        assert_eq!(layout.card.height, CARD_HEIGHT);
        assert!(layout.continue_button.y > layout.card.bottom());
        assert_eq!(layout.continue_button.height, 3);
    }

    #[test]
    fn renders_the_id_on_the_front() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let id: AarunyaId = "AR-26-0042".parse().unwrap();
        RevealView {
            id: Some(&id),
            flipped: false,
            particles: &[],
            now: Instant::now(),
        }
        .render(area, &mut buf);

        let text: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("AR-26-0042"));
        assert!(text.contains("Continue"));
    }
}
