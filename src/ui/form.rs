//! Registration / login form panel.
//!
//! [`FormLayout`] is shared with the mouse handler so clicking a field or the
//! submit button hits exactly what was drawn.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::layout::centered_fixed;
use super::spinner;
use super::theme::Theme;
use crate::app::state::FormState;

const PANEL_WIDTH: u16 = 60;
const FIELD_HEIGHT: u16 = 3;
/// Title, subtitle, blank line, banner.
const HEADER_HEIGHT: u16 = 4;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 24;

/// Where each part of a form lands on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub panel: Rect,
    pub banner: Rect,
    /// One rect per field: label, input and error rows.
    pub fields: Vec<Rect>,
    pub submit: Rect,
    pub hint: Rect,
}

impl FormLayout {
    pub fn compute(body: Rect, field_count: usize) -> Self {
        let content = HEADER_HEIGHT + FIELD_HEIGHT * field_count as u16 + BUTTON_HEIGHT + 1;
        let panel = centered_fixed(PANEL_WIDTH, content + 2, body);
        let inner = Rect::new(
            panel.x + 1,
            panel.y + 1,
            panel.width.saturating_sub(2),
            panel.height.saturating_sub(2),
        );
        // Rows below the panel collapse onto its bottom edge.
        let row = |offset: u16, height: u16| {
            let rect = Rect::new(inner.x, inner.y + offset, inner.width, height).intersection(inner);
            if rect.is_empty() {
                Rect::new(inner.x, inner.bottom(), inner.width, 0)
            } else {
                rect
            }
        };

        let banner = row(3, 1);
        let fields = (0..field_count as u16)
            .map(|i| row(HEADER_HEIGHT + i * FIELD_HEIGHT, FIELD_HEIGHT))
            .collect();
        let button_row = row(HEADER_HEIGHT + FIELD_HEIGHT * field_count as u16, BUTTON_HEIGHT);
        let submit = centered_fixed(BUTTON_WIDTH, BUTTON_HEIGHT, button_row);
        let hint = row(content - 1, 1);

        Self {
            panel,
            banner,
            fields,
            submit,
            hint,
        }
    }
}

pub struct FormView<'a> {
    pub state: &'a FormState,
    pub submit_label: &'a str,
    /// Keyboard help shown under the button.
    pub hint: &'a str,
    pub tick: u64,
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let form = &self.state.form;
        let busy = self.state.gate.is_in_flight();
        let layout = FormLayout::compute(area, form.fields.len());

        Clear.render(layout.panel, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::focus_border_style());
        let inner = block.inner(layout.panel);
        block.render(layout.panel, buf);

        Paragraph::new(vec![
            Line::styled(form.title, Theme::headline_style()),
            Line::styled(form.subtitle, Theme::muted_style()),
        ])
        .alignment(Alignment::Center)
        .render(inner, buf);

        if let Some(banner) = &self.state.banner {
            Paragraph::new(Line::styled(format!("⚠ {banner}"), Theme::error_style()))
                .alignment(Alignment::Center)
                .render(layout.banner, buf);
        }

        for (i, (field, rect)) in form.fields.iter().zip(&layout.fields).enumerate() {
            let focused = i == form.focused && !busy;
            let marker = if focused { "▸ " } else { "  " };

            let input = if field.value.is_empty() {
                Span::styled(field.spec.placeholder, Theme::muted_style())
            } else if field.spec.secret {
                Span::styled(
                    "•".repeat(field.value.chars().count()),
                    Theme::input_style(focused),
                )
            } else {
                Span::styled(field.value.clone(), Theme::input_style(focused))
            };
            let cursor = if focused && (self.tick / 5) % 2 == 0 { "▏" } else { " " };

            let mut lines = vec![
                Line::styled(field.spec.label, Theme::label_style()),
                Line::from(vec![
                    Span::styled(marker, Theme::input_style(focused)),
                    input,
                    Span::styled(cursor, Theme::input_style(true)),
                ]),
            ];
            if let Some(error) = &field.error {
                lines.push(Line::styled(format!("  {error}"), Theme::error_style()));
            }
            Paragraph::new(lines).render(*rect, buf);
        }

        let button_text = if busy {
            format!("{} LOADING...", spinner::frame(self.tick))
        } else {
            format!("{} ▶", self.submit_label)
        };
        Paragraph::new(Line::styled(button_text, Theme::button_style(busy)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Theme::focus_border_style()),
            )
            .render(layout.submit, buf);

        Paragraph::new(Line::styled(self.hint, Theme::muted_style()))
            .alignment(Alignment::Center)
            .render(layout.hint, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_stack_below_the_header_and_above_the_button() {
        let layout = FormLayout::compute(Rect::new(0, 3, 100, 36), 5);
        assert_eq!(layout.fields.len(), 5);
        assert_eq!(layout.fields[0].y, layout.panel.y + 1 + HEADER_HEIGHT);
        for pair in layout.fields.windows(2) {
            assert_eq!(pair[1].y, pair[0].y + FIELD_HEIGHT);
        }
        assert!(layout.submit.y >= layout.fields[4].bottom());
        assert!(layout.hint.bottom() < layout.panel.bottom());
    }

    #[test]
    fn tiny_terminal_clips_instead_of_overflowing() {
        let body = Rect::new(0, 0, 30, 8);
        let layout = FormLayout::compute(body, 5);
        assert!(layout.fields.iter().all(|r| r.bottom() <= body.bottom()));
        assert!(layout.submit.bottom() <= body.bottom());
    }
}
