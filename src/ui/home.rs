//! Home view: hero, about, events and sponsors sections.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::theme::Theme;
use crate::app::state::HomeSection;
use crate::core::festival::{
    self, countdown, sponsors_in, Countdown, Tier, ABOUT, EVENTS, FEST_NAME, SOCIALS, STATS,
    STICKERS, TAGLINE, THEME,
};
use crate::core::session::Session;

pub struct HomeView<'a> {
    pub section: HomeSection,
    pub events_selected: usize,
    pub today: NaiveDate,
    pub session: Option<&'a Session>,
    pub tick: u64,
}

impl Widget for HomeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.section.label()))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        match self.section {
            HomeSection::Hero => self.render_hero(inner, buf),
            HomeSection::About => render_about(inner, buf),
            HomeSection::Events => render_events(self.events_selected, inner, buf),
            HomeSection::Sponsors => render_sponsors(inner, buf),
        }
    }
}

impl HomeView<'_> {
    fn render_hero(&self, area: Rect, buf: &mut Buffer) {
        render_stickers(self.tick, area, buf);

        let countdown_line = match countdown(self.today) {
            Countdown::DaysLeft(1) => "1 DAY TO GO".to_string(),
            Countdown::DaysLeft(days) => format!("{days} DAYS TO GO"),
            Countdown::Live { day } => format!("LIVE NOW · DAY {day} of {}", festival::DAYS),
            Countdown::Over => "SEE YOU NEXT YEAR".to_string(),
        };

        let mut lines = vec![
            Line::raw(""),
            Line::styled(FEST_NAME, Theme::headline_style()),
            Line::styled(format!("THEME: {THEME}"), Theme::accent_style()),
            Line::raw(""),
            Line::styled(TAGLINE, Theme::text_style()),
            Line::raw(""),
            Line::styled(
                countdown_line,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled("March 15-17, 2025", Theme::muted_style()),
            Line::raw(""),
        ];

        match self.session {
            Some(session) => {
                lines.push(Line::styled(
                    format!("PLAYER 1: {} ({})", session.full_name, session.aarunya_id),
                    Theme::label_style(),
                ));
                lines.push(Line::styled("[g] Gallery   [o] Logout", Theme::muted_style()));
            }
            None => {
                lines.push(Line::styled(
                    "[r] Register   [l] Login   [g] Gallery",
                    Theme::label_style(),
                ));
            }
        }

        lines.push(Line::raw(""));
        let socials: Vec<Span> = SOCIALS
            .iter()
            .map(|(name, icon)| Span::styled(format!(" {icon} {name} "), Theme::muted_style()))
            .collect();
        lines.push(Line::from(socials));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Stickers bob along the top and bottom rows of the hero.
fn render_stickers(tick: u64, area: Rect, buf: &mut Buffer) {
    if area.height < 4 || area.width < 8 {
        return;
    }
    let spacing = area.width / STICKERS.len() as u16;
    if spacing < 2 {
        return;
    }
    for (i, sticker) in STICKERS.iter().enumerate() {
        let phase = (tick / 4 + i as u64) % 4;
        let bottom = i % 2 == 1;
        let row = match (bottom, phase) {
            (false, 0 | 1) => area.y,
            (false, _) => area.y + 1,
            (true, 0 | 1) => area.bottom() - 1,
            (true, _) => area.bottom() - 2,
        };
        let col = area.x + spacing * i as u16 + spacing / 2;
        let room = usize::from(area.right().saturating_sub(col));
        buf.set_stringn(col, row, sticker, room, Style::default());
    }
}

fn render_about(area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(area);

    let mut lines = vec![Line::styled("ABOUT THE FEST", Theme::headline_style()), Line::raw("")];
    for paragraph in ABOUT {
        lines.push(Line::styled(*paragraph, Theme::text_style()));
        lines.push(Line::raw(""));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(rows[0], buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(STATS.iter().map(|_| Constraint::Ratio(1, STATS.len() as u32)))
        .split(rows[1]);
    for (stat, col) in STATS.iter().zip(columns.iter()) {
        Paragraph::new(vec![
            Line::raw(stat.emoji),
            Line::styled(stat.number, Theme::accent_style()),
            Line::styled(stat.label, Theme::muted_style()),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Theme::border_style()),
        )
        .render(*col, buf);
    }
}

/// List and details columns of the events section, inside the border.
fn events_columns(inner: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(inner)
}

/// Where the event list lands when the home view is drawn into `body`.
/// Row `n` of the result is event `n`.
pub fn events_list_area(body: Rect) -> Rect {
    let [list, _] = events_columns(Block::default().borders(Borders::ALL).inner(body));
    list
}

fn render_events(selected: usize, area: Rect, buf: &mut Buffer) {
    let columns = events_columns(area);

    let list: Vec<Line> = EVENTS
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let marker = if i == selected { "▸ " } else { "  " };
            let style = if i == selected {
                Theme::selected_style().fg(Theme::hue(event.hue))
            } else {
                Style::default().fg(Theme::hue(event.hue))
            };
            Line::from(vec![
                Span::styled(format!("{marker}{}", event.title), style),
                Span::styled(format!("  {}", event.category), Theme::muted_style()),
            ])
        })
        .collect();
    Paragraph::new(list).render(columns[0], buf);

    let Some(event) = EVENTS.get(selected) else {
        return;
    };
    let date = event
        .date()
        .map(|d| d.format("%a, %b %-d %Y").to_string())
        .unwrap_or_default();
    let details = vec![
        Line::styled(event.title, Style::default().fg(Theme::hue(event.hue)).add_modifier(Modifier::BOLD)),
        Line::styled(event.category, Theme::muted_style()),
        Line::raw(""),
        Line::from(vec![Span::styled("Date   ", Theme::label_style()), Span::raw(date)]),
        Line::from(vec![Span::styled("Time   ", Theme::label_style()), Span::raw(event.time)]),
        Line::from(vec![Span::styled("Venue  ", Theme::label_style()), Span::raw(event.venue)]),
        Line::from(vec![Span::styled("Team   ", Theme::label_style()), Span::raw(event.team_size)]),
        Line::raw(""),
        Line::styled("Register at the fest desk with your Aarunya-ID", Theme::muted_style()),
    ];
    Paragraph::new(details)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Theme::border_style()),
        )
        .render(columns[1], buf);
}

fn render_sponsors(area: Rect, buf: &mut Buffer) {
    let mut lines = vec![Line::styled("OUR SPONSORS", Theme::headline_style()), Line::raw("")];
    for &tier in Tier::ALL {
        lines.push(Line::styled(format!("── {} ──", tier.label()), Theme::accent_style()));
        let names: Vec<Span> = sponsors_in(tier)
            .map(|s| Span::styled(format!("  {} {}  ", s.logo, s.name), Theme::text_style()))
            .collect();
        lines.push(Line::from(names));
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "Want to sponsor? Reach out to the organising team.",
        Theme::muted_style(),
    ));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}
