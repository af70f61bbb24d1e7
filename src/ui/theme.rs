//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::effects::{Fade, Hue};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// Terminal colour for an effect/content hue.
    pub fn hue(hue: Hue) -> Color {
        match hue {
            Hue::Pink => Color::LightMagenta,
            Hue::Cyan => Color::Cyan,
            Hue::Green => Color::Green,
            Hue::Yellow => Color::Yellow,
            Hue::Red => Color::LightRed,
            Hue::Blue => Color::LightBlue,
            Hue::Lime => Color::LightGreen,
            Hue::Violet => Color::Magenta,
            Hue::Amber => Color::LightYellow,
        }
    }

    pub fn particle_style(hue: Hue, fade: Fade) -> Style {
        let style = Style::default().fg(Self::hue(hue));
        match fade {
            Fade::Bright => style.add_modifier(Modifier::BOLD),
            Fade::Normal => style,
            Fade::Dim => style.add_modifier(Modifier::DIM),
        }
    }

    // ── dock ───────────────────────────────────────────────────
    pub fn dock_item_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn dock_active_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    }

    // ── content ────────────────────────────────────────────────
    pub fn headline_style() -> Style {
        Style::default()
            .fg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── forms ──────────────────────────────────────────────────
    pub fn label_style() -> Style {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::LightRed)
    }

    pub fn button_style(busy: bool) -> Style {
        if busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focus_border_style() -> Style {
        Style::default().fg(Color::LightGreen)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
