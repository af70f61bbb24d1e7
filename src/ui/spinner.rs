//! Request indicator: a small spinner + label rendered in the right end of
//! a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// A small "<label>…" indicator with a spinning icon, shown while a request
/// is outstanding.  Invisible when `visible` is false.
pub struct Spinner<'a> {
    pub visible: bool,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
    pub label: &'a str,
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = format!(" {} {} ", frame(self.tick), self.label);
        let width = text.chars().count() as u16;
        if !self.visible || area.width < width + 1 || area.height == 0 {
            return;
        }

        let x = area.x + area.width.saturating_sub(width + 1);
        let line = Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        buf.set_line(x, area.y, &line, width);
    }
}
