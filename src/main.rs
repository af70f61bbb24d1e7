//! AARUNYA 2.0 in the terminal.
//!
//! Run the binary to browse the fest, play in the gallery and register or
//! log in against the Aarunya auth API.
//! Run with `--logout` to forget the stored session without starting the UI.

mod app;
mod config;
mod core;
mod ui;

use std::fs::OpenOptions;
use std::io::{stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    auth_runtime::{self, AuthUpdate},
    effect_runtime::{EffectExpired, EffectSurface, SurfaceKind},
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::{
    auth::HttpAuthClient,
    effects::EffectPreset,
    session::SessionStore,
};
use crate::ui::{
    dock::{Dock, DockItem},
    form::FormView,
    gallery::GalleryView,
    home::HomeView,
    layout::AppLayout,
    reveal::RevealView,
    spinner::Spinner,
    theme::Theme,
    toast::ToastStack,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "AARUNYA 2.0 festival client")]
struct Cli {
    /// Base URL of the auth API (overrides the config file).
    #[arg(long)]
    api_url: Option<String>,

    /// Where the signed-in session is stored.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Log file, used when `RUST_LOG` is set.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for the effect randomness (reproducible particle layouts).
    #[arg(long)]
    seed: Option<u64>,

    /// Forget the stored session and exit.
    #[arg(long)]
    logout: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

// ───────────────────────────────────────── logging ───────────

/// `$XDG_STATE_HOME/aarunya/aarunya.log`.
fn default_log_path() -> PathBuf {
    let state_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".local").join("state")
        });
    state_dir.join("aarunya").join("aarunya.log")
}

/// The UI owns the terminal, so logs go to a file, and only when
/// `RUST_LOG` asks for them.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let path = path.unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState, today: NaiveDate) {
    let layout = AppLayout::from_area(frame.area());
    let now = Instant::now();

    let active = match state.active_view {
        ActiveView::Home => Some(DockItem::Section(state.home_section)),
        ActiveView::Gallery => Some(DockItem::Gallery),
        ActiveView::Login | ActiveView::Register => Some(DockItem::Account),
        ActiveView::IdReveal => None,
    };
    frame.render_widget(
        Dock {
            active,
            authenticated: state.is_authenticated(),
            player: state.session.as_ref().map(|s| s.aarunya_id.as_str()),
        },
        layout.dock_area,
    );

    match state.active_view {
        ActiveView::Home => frame.render_widget(
            HomeView {
                section: state.home_section,
                events_selected: state.events_selected,
                today,
                session: state.session.as_ref(),
                tick: state.tick,
            },
            layout.body_area,
        ),
        ActiveView::Gallery => frame.render_widget(
            GalleryView {
                particles: state.gallery.particles(),
                now,
                pointer: state.pointer,
                tick: state.tick,
            },
            layout.body_area,
        ),
        ActiveView::Login => frame.render_widget(
            FormView {
                state: &state.login,
                submit_label: "CONTINUE",
                hint: "Tab: next  Enter: log in  ^U: clear  ^R: join  Esc: home",
                tick: state.tick,
            },
            layout.body_area,
        ),
        ActiveView::Register => frame.render_widget(
            FormView {
                state: &state.register,
                submit_label: "START GAME",
                hint: "Tab: next  Enter: submit  ^U: clear  ^L: log in  Esc: home",
                tick: state.tick,
            },
            layout.body_area,
        ),
        ActiveView::IdReveal => frame.render_widget(
            RevealView {
                id: state.revealed_id.as_ref(),
                flipped: state.card_flipped,
                particles: state.confetti.particles(),
                now,
            },
            layout.body_area,
        ),
    }

    let hint = match state.active_view {
        ActiveView::Home => state.config.status_bar_hint(),
        ActiveView::Gallery => "click or Space: spawn  Esc: back".to_string(),
        ActiveView::Login | ActiveView::Register => String::new(),
        ActiveView::IdReveal => "Space: flip card  Enter: continue".to_string(),
    };
    frame.render_widget(
        Paragraph::new(hint).style(Theme::status_bar_style()),
        layout.status_area,
    );
    frame.render_widget(
        Spinner {
            visible: state.login.gate.is_in_flight() || state.register.gate.is_in_flight(),
            tick: state.tick,
            label: "contacting server",
        },
        layout.status_area,
    );

    frame.render_widget(
        ToastStack {
            toasts: &state.toasts,
        },
        layout.body_area,
    );
}

// ───────────────────────────────────────── main ─────────────

type Tui = Terminal<CrosstermBackend<Stderr>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let mut user_config = config::AppConfig::load();
    if let Some(url) = cli.api_url.clone() {
        user_config.api_url = url;
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let store = SessionStore::new(
        cli.session_file
            .clone()
            .unwrap_or_else(SessionStore::default_path),
    );
    if cli.logout {
        store.clear()?;
        println!("signed out ({} removed)", store.path().display());
        return Ok(());
    }

    let session = store.load().unwrap_or_else(|err| {
        tracing::warn!("ignoring unreadable session: {err:#}");
        None
    });
    let api = HttpAuthClient::new(&user_config.api_url)?;
    tracing::info!("auth api at {}", api.base_url());

    // ── effect surfaces ───────────────────────────────────────
    let (fx_tx, fx_rx) = mpsc::unbounded_channel::<EffectExpired>();
    let rng = |salt: u64| match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ salt),
        None => StdRng::from_entropy(),
    };
    let gallery = EffectSurface::new(
        SurfaceKind::Gallery,
        EffectPreset::GALLERY,
        rng(0),
        fx_tx.clone(),
    );
    let confetti = EffectSurface::new(SurfaceKind::Confetti, EffectPreset::CONFETTI, rng(1), fx_tx);

    let mut state = AppState::new(user_config, session, gallery, confetti);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, &store, api, fx_rx).await;

    // ── teardown ──────────────────────────────────────────────
    state.gallery.clear();
    state.confetti.clear();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Tui,
    state: &mut AppState,
    store: &SessionStore,
    api: HttpAuthClient,
    mut fx_rx: mpsc::UnboundedReceiver<EffectExpired>,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(state.config.frame_ms));
    let (auth_tx, mut auth_rx) = mpsc::unbounded_channel::<AuthUpdate>();
    let today = chrono::Local::now().date_naive();

    loop {
        // ── draw first ─────────────────────────────────────────
        terminal.draw(|frame| {
            let area = frame.area();
            if area != state.terminal_area {
                state.terminal_area = area;
                state.sync_surfaces();
            }
            draw(frame, state, today);
        })?;

        // ── drain the handler's outbox ─────────────────────────
        if let Some(pending) = state.pending.take() {
            auth_runtime::spawn_submission(auth_tx.clone(), api.clone(), pending);
        }
        if state.logout_requested {
            state.logout_requested = false;
            auth_runtime::logout(state, store);
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Paste(text) => handler::handle_paste(state, &text),
                    AppEvent::Resize => {}
                    AppEvent::Tick => {
                        state.tick = state.tick.wrapping_add(1);
                        state.prune_toasts(Instant::now());
                    }
                }
            }

            Some(expired) = fx_rx.recv() => {
                state.apply_expiry(expired);
                // Drain everything currently queued before redrawing.
                while let Ok(expired) = fx_rx.try_recv() {
                    state.apply_expiry(expired);
                }
            }

            Some(update) = auth_rx.recv() => {
                auth_runtime::apply_update(state, store, update);
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
