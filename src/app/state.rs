//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use super::effect_runtime::{EffectExpired, EffectSurface, SurfaceKind};
use crate::config::AppConfig;
use crate::core::{
    auth::{LoginRequest, RegisterRequest},
    gate::{SubmissionGate, Ticket},
    session::Session,
    validation::{AarunyaId, Form},
};
use crate::ui::layout::AppLayout;

/// Which screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Home,
    Gallery,
    Login,
    Register,
    /// Freshly issued Aarunya-ID card shown after registration.
    IdReveal,
}

/// Sections of the home view, in dock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeSection {
    #[default]
    Hero,
    About,
    Events,
    Sponsors,
}

impl HomeSection {
    pub const ALL: &[HomeSection] = &[
        HomeSection::Hero,
        HomeSection::About,
        HomeSection::Events,
        HomeSection::Sponsors,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeSection::Hero => "Home",
            HomeSection::About => "About",
            HomeSection::Events => "Events",
            HomeSection::Sponsors => "Sponsors",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification in the corner of the screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// A form together with its submission gate and the last request error.
pub struct FormState {
    pub form: Form,
    pub gate: SubmissionGate,
    /// Error banner above the fields (server or transport failure).
    pub banner: Option<String>,
}

impl FormState {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            gate: SubmissionGate::default(),
            banner: None,
        }
    }

    /// Clear values and abandon any in-flight request.
    pub fn reset(&mut self) {
        self.form.clear();
        self.gate.reset();
        self.banner = None;
    }
}

/// A request admitted by a gate, waiting for the main loop to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSubmission {
    Register { ticket: Ticket, request: RegisterRequest },
    Login { ticket: Ticket, request: LoginRequest },
}

/// Top-level application state.
pub struct AppState {
    pub active_view: ActiveView,
    pub home_section: HomeSection,
    /// Highlighted card in the events section.
    pub events_selected: usize,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// User configuration (bindings, API URL, timings).
    pub config: AppConfig,
    /// Last known terminal size; zero until the first draw.
    pub terminal_area: Rect,
    /// Monotonic tick counter (drives spinners and blinking).
    pub tick: u64,
    pub login: FormState,
    pub register: FormState,
    /// Signed-in user, if any.
    pub session: Option<Session>,
    /// ID shown on the reveal card.
    pub revealed_id: Option<AarunyaId>,
    pub card_flipped: bool,
    pub gallery: EffectSurface,
    pub confetti: EffectSurface,
    /// Last mouse position, for the gallery cursor ring.
    pub pointer: Option<(u16, u16)>,
    pub toasts: Vec<Toast>,
    /// Outbox drained by the main loop after each event.
    pub pending: Option<PendingSubmission>,
    /// Set by the handler; the main loop clears the stored session.
    pub logout_requested: bool,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        session: Option<Session>,
        gallery: EffectSurface,
        confetti: EffectSurface,
    ) -> Self {
        Self {
            active_view: ActiveView::default(),
            home_section: HomeSection::default(),
            events_selected: 0,
            should_quit: false,
            config,
            terminal_area: Rect::default(),
            tick: 0,
            login: FormState::new(Form::login()),
            register: FormState::new(Form::registration()),
            session,
            revealed_id: None,
            card_flipped: false,
            gallery,
            confetti,
            pointer: None,
            toasts: Vec::new(),
            pending: None,
            logout_requested: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Switch views, tearing down the effect surfaces the new view hides.
    pub fn set_view(&mut self, view: ActiveView) {
        if self.active_view == view {
            return;
        }
        tracing::debug!("view {:?} -> {:?}", self.active_view, view);
        self.active_view = view;
        self.sync_surfaces();
    }

    /// Mount the surface of the visible view at its current layout area and
    /// unmount the others.  Called after every view switch and resize.
    pub fn sync_surfaces(&mut self) {
        let layout = AppLayout::from_area(self.terminal_area);

        if self.active_view == ActiveView::Gallery {
            self.gallery.mount(layout.body_area);
        } else if self.gallery.bounds().is_some() {
            self.gallery.unmount();
        }

        if self.active_view == ActiveView::IdReveal {
            self.confetti.mount(layout.body_area);
        } else if self.confetti.bounds().is_some() {
            self.confetti.unmount();
        }
    }

    /// Route a timer message to its surface.
    pub fn apply_expiry(&mut self, msg: EffectExpired) {
        match msg.surface {
            SurfaceKind::Gallery => self.gallery.expire(msg.batch),
            SurfaceKind::Confetti => self.confetti.expire(msg.batch),
        }
    }

    pub fn push_toast(&mut self, kind: ToastKind, title: impl Into<String>, body: impl Into<String>) {
        self.toasts.push(Toast {
            title: title.into(),
            body: body.into(),
            kind,
            expires_at: Instant::now() + Duration::from_millis(self.config.toast_ms),
        });
        // Keep the stack short.
        if self.toasts.len() > 3 {
            self.toasts.remove(0);
        }
    }

    /// Drop toasts whose time is up.
    pub fn prune_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    use super::*;
    use crate::core::effects::EffectPreset;

    /// A state with a known 100x40 terminal, plus the effect timer receiver.
    pub fn state() -> (AppState, mpsc::UnboundedReceiver<EffectExpired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let gallery = EffectSurface::new(
            SurfaceKind::Gallery,
            EffectPreset::GALLERY,
            StdRng::seed_from_u64(1),
            tx.clone(),
        );
        let confetti = EffectSurface::new(
            SurfaceKind::Confetti,
            EffectPreset::CONFETTI,
            StdRng::seed_from_u64(2),
            tx,
        );
        let mut state = AppState::new(AppConfig::default(), None, gallery, confetti);
        state.terminal_area = Rect::new(0, 0, 100, 40);
        (state, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_cycle_both_ways() {
        assert_eq!(HomeSection::Sponsors.next(), HomeSection::Hero);
        assert_eq!(HomeSection::Hero.prev(), HomeSection::Sponsors);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_gallery_tears_down_its_particles() {
        let (mut state, _rx) = test_support::state();
        state.set_view(ActiveView::Gallery);
        assert!(state.gallery.bounds().is_some());

        state.gallery.spawn_batch(50, 20, 5).unwrap();
        assert_eq!(state.gallery.pending_timers(), 1);

        state.set_view(ActiveView::Home);
        assert!(state.gallery.bounds().is_none());
        assert!(state.gallery.particles().is_empty());
        assert_eq!(state.gallery.pending_timers(), 0);
    }

    #[test]
    fn toasts_expire() {
        let (mut state, _rx) = test_support::state();
        state.push_toast(ToastKind::Success, "Hi", "there");
        let later = Instant::now() + Duration::from_millis(state.config.toast_ms + 1);
        state.prune_toasts(later);
        assert!(state.toasts.is_empty());
    }
}
