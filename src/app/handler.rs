//! Input handling: maps key/mouse/paste events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::auth::{LoginRequest, RegisterRequest};
use crate::core::festival::EVENTS;
use crate::core::gate::{GateError, Ticket};
use crate::ui::dock::{self, DockItem};
use crate::ui::form::FormLayout;
use crate::ui::home;
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::reveal::RevealLayout;

use super::state::{ActiveView, AppState, FormState, HomeSection, PendingSubmission};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Home => handle_home_key(state, key),
        ActiveView::Gallery => handle_gallery_key(state, key),
        ActiveView::Login | ActiveView::Register => handle_form_key(state, key),
        ActiveView::IdReveal => handle_reveal_key(state, key),
    }
}

// ── Home (configurable bindings) ────────────────────────────────

fn handle_home_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::NextSection => state.home_section = state.home_section.next(),
        Action::PrevSection => state.home_section = state.home_section.prev(),
        Action::MoveUp => move_event_selection(state, -1),
        Action::MoveDown => move_event_selection(state, 1),
        Action::OpenGallery => state.set_view(ActiveView::Gallery),
        Action::OpenLogin => state.set_view(ActiveView::Login),
        Action::OpenRegister => state.set_view(ActiveView::Register),
        Action::Logout => request_logout(state),
        Action::Back => state.home_section = HomeSection::Hero,
    }
}

fn move_event_selection(state: &mut AppState, delta: isize) {
    if state.home_section != HomeSection::Events || EVENTS.is_empty() {
        return;
    }
    let max = EVENTS.len() - 1;
    state.events_selected = state
        .events_selected
        .saturating_add_signed(delta)
        .min(max);
}

fn request_logout(state: &mut AppState) {
    if state.is_authenticated() {
        state.logout_requested = true;
    }
}

// ── Gallery ─────────────────────────────────────────────────────

fn handle_gallery_key(state: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
        spawn_at_pointer(state);
        return;
    }
    match state.config.match_key(key) {
        Some(Action::Back) => state.set_view(ActiveView::Home),
        Some(Action::Quit) => state.should_quit = true,
        Some(Action::OpenLogin) => state.set_view(ActiveView::Login),
        Some(Action::OpenRegister) => state.set_view(ActiveView::Register),
        _ => {}
    }
}

/// Keyboard equivalent of a click: spawn under the mouse if it is over the
/// stage, otherwise in the middle.
fn spawn_at_pointer(state: &mut AppState) {
    let over_stage = match (state.pointer, state.gallery.bounds()) {
        (Some((col, row)), Some(area)) => point_in_rect(area, col, row).then_some((col, row)),
        _ => None,
    };
    match over_stage {
        Some((col, row)) => state.gallery.spawn_random_batch(col, row),
        None => state.gallery.spawn_centered(),
    };
}

// ── Forms (free text input) ─────────────────────────────────────

fn active_form_mut(state: &mut AppState) -> Option<&mut FormState> {
    match state.active_view {
        ActiveView::Login => Some(&mut state.login),
        ActiveView::Register => Some(&mut state.register),
        _ => None,
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => {
            state.set_view(ActiveView::Home);
            return;
        }
        KeyCode::Char('l') if ctrl => {
            state.set_view(ActiveView::Login);
            return;
        }
        KeyCode::Char('r') if ctrl => {
            state.set_view(ActiveView::Register);
            return;
        }
        // Clearing also abandons an outstanding request; its reply is dropped.
        KeyCode::Char('u') if ctrl => {
            if let Some(fs) = active_form_mut(state) {
                if fs.gate.is_in_flight() {
                    tracing::debug!("form cleared with a request in flight");
                }
                fs.reset();
            }
            return;
        }
        _ => {}
    }

    let Some(fs) = active_form_mut(state) else {
        return;
    };
    // Inputs are locked while the request is outstanding.
    if fs.gate.is_in_flight() {
        return;
    }

    let mut submit = false;
    match key.code {
        KeyCode::Tab | KeyCode::Down => fs.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => fs.form.focus_prev(),
        KeyCode::Enter => submit = true,
        KeyCode::Backspace => fs.form.backspace(),
        KeyCode::Char(c) if !ctrl && !alt => fs.form.push_char(c),
        _ => {}
    }

    if submit {
        submit_active_form(state);
    }
}

/// Run the active form through its gate.  When admitted, the request is
/// queued in `state.pending` for the main loop to send; a form that is
/// invalid or already in flight queues nothing.
pub fn submit_active_form(state: &mut AppState) {
    let pending = match state.active_view {
        ActiveView::Login => {
            let fs = &mut state.login;
            admit(fs).map(|ticket| PendingSubmission::Login {
                ticket,
                request: LoginRequest::from_form(&fs.form),
            })
        }
        ActiveView::Register => {
            let fs = &mut state.register;
            admit(fs).map(|ticket| PendingSubmission::Register {
                ticket,
                request: RegisterRequest::from_form(&fs.form),
            })
        }
        _ => None,
    };

    if let Some(pending) = pending {
        state.pending = Some(pending);
    }
}

fn admit(fs: &mut FormState) -> Option<Ticket> {
    match fs.gate.begin(&mut fs.form) {
        Ok(ticket) => {
            fs.banner = None;
            Some(ticket)
        }
        Err(GateError::InFlight) => {
            tracing::debug!("submit ignored: request already in flight");
            None
        }
        Err(GateError::Invalid(errors)) => {
            tracing::debug!("submit blocked by {} invalid field(s)", errors.len());
            None
        }
    }
}

/// Bracketed paste goes into the focused field, line breaks dropped.
pub fn handle_paste(state: &mut AppState, text: &str) {
    let Some(fs) = active_form_mut(state) else {
        return;
    };
    if fs.gate.is_in_flight() {
        return;
    }
    fs.form.push_str(text);
}

// ── ID reveal ───────────────────────────────────────────────────

fn handle_reveal_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('f') => state.card_flipped = !state.card_flipped,
        KeyCode::Enter | KeyCode::Esc => continue_from_reveal(state),
        _ => {
            if state.config.match_key(key) == Some(Action::Quit) {
                state.should_quit = true;
            }
        }
    }
}

/// Close the card and head to login with the new ID filled in.
fn continue_from_reveal(state: &mut AppState) {
    state.card_flipped = false;
    if let Some(id) = state.revealed_id.take() {
        if !state.login.gate.is_in_flight() {
            state.login.form.clear();
            state.login.form.set_value("aarunyaId", id.as_str());
            // Straight to the password.
            state.login.form.focus_next();
        }
    }
    state.set_view(ActiveView::Login);
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            state.pointer = Some((col, row));
        }
        MouseEventKind::Down(MouseButton::Left) => {
            state.pointer = Some((col, row));
            handle_click(state, col, row);
        }
        MouseEventKind::ScrollDown if state.active_view == ActiveView::Home => {
            move_event_selection(state, 1);
        }
        MouseEventKind::ScrollUp if state.active_view == ActiveView::Home => {
            move_event_selection(state, -1);
        }
        _ => {}
    }
}

fn handle_click(state: &mut AppState, col: u16, row: u16) {
    let layout = AppLayout::from_area(state.terminal_area);

    // The reveal card is modal: the dock is inert behind it.
    if state.active_view == ActiveView::IdReveal {
        let reveal = RevealLayout::compute(layout.body_area);
        if point_in_rect(reveal.continue_button, col, row) {
            continue_from_reveal(state);
        } else if point_in_rect(reveal.card, col, row) {
            state.card_flipped = !state.card_flipped;
        }
        return;
    }

    if let Some(item) = dock::hit(layout.dock_area, state.is_authenticated(), col, row) {
        activate_dock(state, item);
        return;
    }

    match state.active_view {
        ActiveView::Gallery => {
            if point_in_rect(layout.body_area, col, row) {
                state.gallery.spawn_random_batch(col, row);
            }
        }
        ActiveView::Login | ActiveView::Register => click_form(state, layout, col, row),
        ActiveView::Home => {
            let list = home::events_list_area(layout.body_area);
            if state.home_section == HomeSection::Events && point_in_rect(list, col, row) {
                let idx = usize::from(row - list.y);
                if idx < EVENTS.len() {
                    state.events_selected = idx;
                }
            }
        }
        ActiveView::IdReveal => {}
    }
}

fn click_form(state: &mut AppState, layout: AppLayout, col: u16, row: u16) {
    let Some(fs) = active_form_mut(state) else {
        return;
    };
    let form_layout = FormLayout::compute(layout.body_area, fs.form.fields.len());

    if point_in_rect(form_layout.submit, col, row) {
        submit_active_form(state);
        return;
    }
    if fs.gate.is_in_flight() {
        return;
    }
    if let Some(idx) = form_layout
        .fields
        .iter()
        .position(|r| point_in_rect(*r, col, row))
    {
        fs.form.focused = idx;
    }
}

fn activate_dock(state: &mut AppState, item: DockItem) {
    match item {
        DockItem::Section(section) => {
            state.home_section = section;
            state.set_view(ActiveView::Home);
        }
        DockItem::Gallery => state.set_view(ActiveView::Gallery),
        DockItem::Account if state.is_authenticated() => request_logout(state),
        DockItem::Account => state.set_view(ActiveView::Login),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;
    use crate::app::auth_runtime::{apply_update, AuthUpdate};
    use crate::app::state::test_support;
    use crate::core::auth::LoginResponse;
    use crate::core::session::{Session, SessionStore};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn click(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_fills_the_focused_field_and_tab_moves_on() {
        let (mut state, _rx) = test_support::state();
        handle_key(&mut state, key(KeyCode::Char('l')));
        assert_eq!(state.active_view, ActiveView::Login);

        // 'q' is text here, not quit.
        type_text(&mut state, "AR-26-0q");
        handle_key(&mut state, key(KeyCode::Backspace));
        handle_key(&mut state, key(KeyCode::Tab));
        type_text(&mut state, "pw");

        assert!(!state.should_quit);
        assert_eq!(state.login.form.value("aarunyaId"), "AR-26-0");
        assert_eq!(state.login.form.value("password"), "pw");
    }

    #[test]
    fn enter_submits_and_locks_the_form() {
        let (mut state, _rx) = test_support::state();
        state.set_view(ActiveView::Login);
        state.login.form.set_value("aarunyaId", "AR-26-0001");
        state.login.form.set_value("password", "hunter22");

        handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(state.pending, Some(PendingSubmission::Login { .. })));

        type_text(&mut state, "xyz");
        handle_paste(&mut state, "more");
        assert_eq!(state.login.form.value("aarunyaId"), "AR-26-0001");
    }

    #[test]
    fn paste_drops_line_breaks() {
        let (mut state, _rx) = test_support::state();
        state.set_view(ActiveView::Register);
        handle_paste(&mut state, "Asha\r\nVerma");
        assert_eq!(state.register.form.value("fullName"), "AshaVerma");
    }

    #[tokio::test(start_paused = true)]
    async fn gallery_clicks_spawn_batches_but_dock_clicks_do_not() {
        let (mut state, _rx) = test_support::state();
        handle_key(&mut state, key(KeyCode::Char('g')));
        assert_eq!(state.active_view, ActiveView::Gallery);

        handle_mouse(&mut state, click(50, 20));
        let after_one = state.gallery.particles().len();
        assert!((3..=8).contains(&after_one));
        assert_eq!(state.gallery.pending_timers(), 1);

        // Row 1 is inside the dock.
        handle_mouse(&mut state, click(0, 1));
        assert_eq!(state.gallery.particles().len(), after_one);

        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert_eq!(state.gallery.pending_timers(), 2);
    }

    #[test]
    fn dock_click_switches_views() {
        let (mut state, _rx) = test_support::state();
        let layout = AppLayout::from_area(state.terminal_area);
        let (_, rect) = dock::item_rects(layout.dock_area, false)
            .into_iter()
            .find(|(item, _)| *item == DockItem::Section(HomeSection::Sponsors))
            .unwrap();

        state.set_view(ActiveView::Login);
        handle_mouse(&mut state, click(rect.x, rect.y));
        assert_eq!(state.active_view, ActiveView::Home);
        assert_eq!(state.home_section, HomeSection::Sponsors);
    }

    #[test]
    fn logout_is_only_requested_when_signed_in() {
        let (mut state, _rx) = test_support::state();
        handle_key(&mut state, key(KeyCode::Char('o')));
        assert!(!state.logout_requested);

        state.session = Some(Session {
            auth_token: "t".into(),
            aarunya_id: "AR-26-0001".into(),
            user_email: "a@b.com".into(),
            full_name: "A B".into(),
        });
        handle_key(&mut state, key(KeyCode::Char('o')));
        assert!(state.logout_requested);
    }

    #[tokio::test(start_paused = true)]
    async fn continuing_from_the_card_prefills_login() {
        let (mut state, _rx) = test_support::state();
        state.revealed_id = Some("AR-26-1234".parse().unwrap());
        state.set_view(ActiveView::IdReveal);

        let reveal = RevealLayout::compute(AppLayout::from_area(state.terminal_area).body_area);
        handle_mouse(&mut state, click(reveal.card.x + 2, reveal.card.y + 2));
        assert!(state.card_flipped);

        handle_mouse(&mut state, click(reveal.continue_button.x + 1, reveal.continue_button.y + 1));
        assert_eq!(state.active_view, ActiveView::Login);
        assert_eq!(state.login.form.value("aarunyaId"), "AR-26-1234");
        assert_eq!(state.login.form.focused, 1);
        assert!(!state.card_flipped);
    }

    #[test]
    fn events_selection_is_clamped() {
        let (mut state, _rx) = test_support::state();
        state.home_section = HomeSection::Events;
        for _ in 0..20 {
            handle_key(&mut state, key(KeyCode::Down));
        }
        assert_eq!(state.events_selected, EVENTS.len() - 1);
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.events_selected, EVENTS.len() - 2);
    }

    #[test]
    fn clearing_a_form_drops_the_reply_to_its_abandoned_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let (mut state, _rx) = test_support::state();
        state.set_view(ActiveView::Login);
        state.login.form.set_value("aarunyaId", "AR-26-0001");
        state.login.form.set_value("password", "hunter22");
        handle_key(&mut state, key(KeyCode::Enter));
        let Some(PendingSubmission::Login { ticket: abandoned, .. }) = state.pending.take() else {
            panic!("expected a login submission");
        };

        handle_key(&mut state, ctrl('u'));
        assert!(!state.login.gate.is_in_flight());
        assert_eq!(state.login.form.value("aarunyaId"), "");

        // The form is editable again and can be resubmitted.
        type_text(&mut state, "AR-26-0002");
        handle_key(&mut state, key(KeyCode::Tab));
        type_text(&mut state, "hunter22");
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(state.pending, Some(PendingSubmission::Login { .. })));

        apply_update(
            &mut state,
            &store,
            AuthUpdate::LoggedIn {
                ticket: abandoned,
                result: Ok(LoginResponse {
                    token: "t1".into(),
                    aarunya_id: "AR-26-0001".into(),
                    email: "a@b.com".into(),
                    full_name: "A B".into(),
                }),
            },
        );
        assert!(state.session.is_none());
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(state.active_view, ActiveView::Login);
        // The newer request still holds the gate.
        assert!(state.login.gate.is_in_flight());
    }

    #[test]
    fn only_the_event_list_column_selects_events() {
        let (mut state, _rx) = test_support::state();
        state.home_section = HomeSection::Events;
        let list = home::events_list_area(AppLayout::from_area(state.terminal_area).body_area);

        handle_mouse(&mut state, click(list.x + 1, list.y + 2));
        assert_eq!(state.events_selected, 2);

        // Same row, over the details pane.
        handle_mouse(&mut state, click(list.right() + 3, list.y + 4));
        assert_eq!(state.events_selected, 2);

        handle_mouse(&mut state, click(list.x, list.y + 4));
        assert_eq!(state.events_selected, 4);
    }
}
