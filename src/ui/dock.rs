//! Navigation dock along the top of the screen.
//!
//! Item positions come from [`item_rects`], which both the renderer and the
//! mouse handler use, so clicks always land on what is drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::theme::Theme;
use crate::app::state::HomeSection;
use crate::core::festival::FEST_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockItem {
    Section(HomeSection),
    Gallery,
    /// "Login" while signed out, "Logout" while signed in.
    Account,
}

const ITEMS: &[DockItem] = &[
    DockItem::Section(HomeSection::Hero),
    DockItem::Section(HomeSection::About),
    DockItem::Section(HomeSection::Events),
    DockItem::Gallery,
    DockItem::Section(HomeSection::Sponsors),
    DockItem::Account,
];

const GAP: u16 = 1;

impl DockItem {
    pub fn label(self, authenticated: bool) -> &'static str {
        match self {
            DockItem::Section(section) => section.label(),
            DockItem::Gallery => "Gallery",
            DockItem::Account if authenticated => "Logout",
            DockItem::Account => "Login",
        }
    }
}

/// Screen rect of every dock item inside `area` (the whole dock, borders
/// included).  Items that do not fit are left out.
pub fn item_rects(area: Rect, authenticated: bool) -> Vec<(DockItem, Rect)> {
    if area.height < 3 || area.width < 3 {
        return Vec::new();
    }
    let widths: Vec<u16> = ITEMS
        .iter()
        .map(|item| item.label(authenticated).len() as u16 + 4)
        .collect();
    let total = widths.iter().sum::<u16>() + GAP * (widths.len() as u16 - 1);

    let inner_x = area.x + 1;
    let inner_w = area.width - 2;
    let mut x = inner_x + inner_w.saturating_sub(total) / 2;
    let row = area.y + 1;

    let mut rects = Vec::new();
    for (item, w) in ITEMS.iter().zip(widths) {
        if x + w > inner_x + inner_w {
            break;
        }
        rects.push((*item, Rect::new(x, row, w, 1)));
        x += w + GAP;
    }
    rects
}

/// Dock item under the cell `(col, row)`.
pub fn hit(area: Rect, authenticated: bool, col: u16, row: u16) -> Option<DockItem> {
    item_rects(area, authenticated)
        .into_iter()
        .find(|(_, r)| super::layout::point_in_rect(*r, col, row))
        .map(|(item, _)| item)
}

pub struct Dock<'a> {
    pub active: Option<DockItem>,
    pub authenticated: bool,
    /// Signed-in player's ID, shown in the dock title.
    pub player: Option<&'a str>,
}

impl Widget for Dock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.player {
            Some(id) => format!(" {FEST_NAME} · {id} "),
            None => format!(" {FEST_NAME} "),
        };
        let block = Block::default()
            .title(title)
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        block.render(area, buf);

        for (item, rect) in item_rects(area, self.authenticated) {
            let style = if self.active == Some(item) {
                Theme::dock_active_style()
            } else {
                Theme::dock_item_style()
            };
            let line = Line::from(Span::styled(
                format!("  {}  ", item.label(self.authenticated)),
                style,
            ));
            buf.set_line(rect.x, rect.y, &line, rect.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_match_rendered_items() {
        let area = Rect::new(0, 0, 100, 3);
        let rects = item_rects(area, false);
        assert_eq!(rects.len(), ITEMS.len());

        let (_, gallery) = rects.iter().find(|(i, _)| *i == DockItem::Gallery).unwrap();
        assert_eq!(hit(area, false, gallery.x, gallery.y), Some(DockItem::Gallery));
        assert_eq!(hit(area, false, 0, 1), None);
        assert_eq!(hit(area, false, gallery.x, 0), None);
    }

    #[test]
    fn narrow_dock_drops_trailing_items() {
        let rects = item_rects(Rect::new(0, 0, 30, 3), true);
        assert!(rects.len() < ITEMS.len());
        assert!(rects.iter().all(|(_, r)| r.right() <= 29));
    }
}
