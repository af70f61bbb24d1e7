//! Toast stack in the top-right corner.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::state::{Toast, ToastKind};

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 4;

pub struct ToastStack<'a> {
    pub toasts: &'a [Toast],
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.right().saturating_sub(width + 1).max(area.x);
        let mut y = area.y;

        // Newest on top.
        for toast in self.toasts.iter().rev() {
            if y + TOAST_HEIGHT > area.bottom() {
                break;
            }
            let rect = Rect::new(x, y, width, TOAST_HEIGHT);
            let (icon, color) = match toast.kind {
                ToastKind::Success => ("✔", Color::LightGreen),
                ToastKind::Error => ("✖", Color::LightRed),
            };

            Clear.render(rect, buf);
            Paragraph::new(vec![
                Line::styled(
                    format!("{icon} {}", toast.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Line::raw(toast.body.as_str()),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            )
            .render(rect, buf);

            y += TOAST_HEIGHT;
        }
    }
}
