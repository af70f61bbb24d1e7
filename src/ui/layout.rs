//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: navigation dock on top, view body, status bar.
pub struct AppLayout {
    pub dock_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // dock
                Constraint::Min(3),    // body (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            dock_area: chunks[0],
            body_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.dock_area, Rect::new(0, 0, 100, 3));
        assert_eq!(layout.body_area, Rect::new(0, 3, 100, 36));
        assert_eq!(layout.status_area, Rect::new(0, 39, 100, 1));
    }

    #[test]
    fn centered_rect_shrinks_to_fit() {
        let area = Rect::new(10, 10, 20, 6);
        assert_eq!(centered_fixed(10, 4, area), Rect::new(15, 11, 10, 4));
        assert_eq!(centered_fixed(50, 50, area), area);
        assert!(point_in_rect(area, 10, 10));
        assert!(!point_in_rect(area, 30, 10));
    }
}
