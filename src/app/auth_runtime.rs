//! Background auth requests and how their outcomes change the app.
//!
//! The input handler only queues a [`PendingSubmission`]; the main loop hands
//! it to [`spawn_submission`], and the reply comes back as an [`AuthUpdate`]
//! applied by [`apply_update`] on the event loop.

use tokio::sync::mpsc;

use super::state::{ActiveView, AppState, HomeSection, PendingSubmission, ToastKind};
use crate::core::{
    auth::{AuthApi, AuthError, Endpoint, LoginResponse, RegisterResponse},
    gate::Ticket,
    session::{Session, SessionStore},
    validation::AarunyaId,
};

pub enum AuthUpdate {
    Registered {
        ticket: Ticket,
        result: Result<RegisterResponse, AuthError>,
    },
    LoggedIn {
        ticket: Ticket,
        result: Result<LoginResponse, AuthError>,
    },
}

/// Send one admitted request in the background.
pub fn spawn_submission<A: AuthApi>(
    tx: mpsc::UnboundedSender<AuthUpdate>,
    api: A,
    pending: PendingSubmission,
) {
    tokio::spawn(async move {
        let update = match pending {
            PendingSubmission::Register { ticket, request } => AuthUpdate::Registered {
                ticket,
                result: api.register(request).await,
            },
            PendingSubmission::Login { ticket, request } => AuthUpdate::LoggedIn {
                ticket,
                result: api.login(request).await,
            },
        };
        let _ = tx.send(update);
    });
}

/// Apply a finished request.  Replies for a form that was reset while the
/// request was in flight are dropped.
pub fn apply_update(state: &mut AppState, store: &SessionStore, update: AuthUpdate) {
    match update {
        AuthUpdate::Registered { ticket, result } => {
            if !state.register.gate.settle(ticket) {
                tracing::debug!("dropping stale registration reply");
                return;
            }
            match result {
                Ok(resp) => on_registered(state, resp),
                Err(err) => {
                    tracing::warn!("registration failed: {err}");
                    let notice = err.notice(Endpoint::Register);
                    state.register.banner = Some(notice.banner);
                    state.push_toast(ToastKind::Error, notice.title, notice.toast);
                }
            }
        }
        AuthUpdate::LoggedIn { ticket, result } => {
            if !state.login.gate.settle(ticket) {
                tracing::debug!("dropping stale login reply");
                return;
            }
            match result {
                Ok(resp) => on_logged_in(state, store, resp),
                Err(err) => {
                    tracing::warn!("login failed: {err}");
                    let notice = err.notice(Endpoint::Login);
                    state.login.banner = Some(notice.banner);
                    state.push_toast(ToastKind::Error, notice.title, notice.toast);
                }
            }
        }
    }
}

fn on_registered(state: &mut AppState, resp: RegisterResponse) {
    let id = match resp.aarunya_id.parse::<AarunyaId>() {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!("server issued a malformed id: {err}");
            let message = "Registration succeeded but the server sent an invalid Aarunya-ID";
            state.register.banner = Some(message.to_string());
            state.push_toast(ToastKind::Error, "Registration Failed", message);
            return;
        }
    };
    tracing::info!("registered {id}");

    state.register.form.clear();
    state.register.banner = None;
    state.revealed_id = Some(id);
    state.card_flipped = false;
    state.set_view(ActiveView::IdReveal);
    state.confetti.spawn_centered();
    state.push_toast(
        ToastKind::Success,
        "Registration Successful!",
        "Your Aarunya-ID has been generated",
    );
}

fn on_logged_in(state: &mut AppState, store: &SessionStore, resp: LoginResponse) {
    let session = Session::from(resp);
    tracing::info!("signed in as {}", session.aarunya_id);

    if let Err(err) = store.save(&session) {
        tracing::warn!("could not persist session: {err:#}");
        state.push_toast(
            ToastKind::Error,
            "Session not saved",
            "You are signed in for this run only",
        );
    }

    let welcome = format!("Welcome back, {}!", session.full_name);
    state.session = Some(session);
    state.login.form.clear();
    state.login.banner = None;
    state.home_section = HomeSection::Hero;
    state.set_view(ActiveView::Home);
    state.push_toast(ToastKind::Success, "Login Successful!", welcome);
}

/// Sign out: forget the session in memory and on disk.
pub fn logout(state: &mut AppState, store: &SessionStore) {
    if state.session.take().is_none() {
        return;
    }
    if let Err(err) = store.clear() {
        tracing::warn!("could not remove session file: {err:#}");
    }
    state.push_toast(ToastKind::Success, "Logged out", "See you at the fest!");
}
