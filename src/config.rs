//! User configuration: keybindings, API endpoint, timings, persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/aarunya/config.toml` (default `~/.config/aarunya/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::auth::DEFAULT_API_URL;

const DEFAULT_FRAME_MS: u64 = 33;
const DEFAULT_TOAST_MS: u64 = 4000;

// ───────────────────────────────────────── actions ───────────

/// Configurable actions outside of text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextSection,
    PrevSection,
    MoveUp,
    MoveDown,
    OpenGallery,
    OpenLogin,
    OpenRegister,
    Logout,
    Back,
    Quit,
}

impl Action {
    /// Ordered list of all actions (config file order).
    pub const ALL: &[Action] = &[
        Action::NextSection,
        Action::PrevSection,
        Action::MoveUp,
        Action::MoveDown,
        Action::OpenGallery,
        Action::OpenLogin,
        Action::OpenRegister,
        Action::Logout,
        Action::Back,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::OpenGallery => "open_gallery",
            Action::OpenLogin => "open_login",
            Action::OpenRegister => "open_register",
            Action::Logout => "logout",
            Action::Back => "back",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT are compared strictly; SHIFT is folded into the
    /// character for `Char` keys and implied by `BackTab`, so it is ignored
    /// there.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match event.code {
            KeyCode::Char(_) | KeyCode::BackTab => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => MODIFIER_MASK,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for hints, e.g. `"→"`, `"Ctrl+c"`, `"q"`.
    pub fn display(&self) -> String {
        self.render(true)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        let name = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::BackTab, _) => "BackTab".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&name);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Right"`, `"q"`, `"Esc"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ => {
                // Keep the original case for single characters.
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Base URL of the auth API.
    pub api_url: String,
    /// Redraw interval while idle (drives particle animation).
    pub frame_ms: u64,
    /// How long a toast stays on screen.
    pub toast_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            api_url: DEFAULT_API_URL.to_string(),
            frame_ms: DEFAULT_FRAME_MS,
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(NextSection, vec![KeyBind::new(Right, n), KeyBind::new(Tab, n)]);
        m.insert(PrevSection, vec![KeyBind::new(Left, n), KeyBind::new(BackTab, n)]);
        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(OpenGallery, vec![KeyBind::new(Char('g'), n)]);
        m.insert(OpenLogin, vec![KeyBind::new(Char('l'), n)]);
        m.insert(OpenRegister, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Logout, vec![KeyBind::new(Char('o'), n)]);
        m.insert(Back, vec![KeyBind::new(Esc, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action bound to a key event.  The binding with the most
    /// modifiers wins when several match.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint for the home view.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: sections | {}: gallery | {}: login | {}: register | {}: quit",
            self.short_binding(Action::PrevSection),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::OpenGallery),
            self.short_binding(Action::OpenLogin),
            self.short_binding(Action::OpenRegister),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "api_url" => {
                    if !value.is_empty() {
                        config.api_url = value.to_string();
                    }
                    continue;
                }
                "frame_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.frame_ms = v.clamp(16, 200);
                    }
                    continue;
                }
                "toast_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.toast_ms = v.clamp(1000, 15_000);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("unknown config key {key:?}");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# aarunya configuration".to_string(),
            String::new(),
            format!("api_url = \"{}\"", self.api_url),
            format!("frame_ms = {}", self.frame_ms),
            format!("toast_ms = {}", self.toast_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, BackTab, Space, F1-F12"
                .to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.render(false)).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/aarunya/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("aarunya").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn defaults_match_expected_actions() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('g'), KeyModifiers::NONE)),
            Some(Action::OpenGallery)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::NextSection)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.api_url = "https://auth.example.org".into();
        config.frame_ms = 50;
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL)]);

        let parsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(parsed.api_url, "https://auth.example.org");
        assert_eq!(parsed.frame_ms, 50);
        assert_eq!(
            parsed.match_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(parsed.bindings, config.bindings);
    }

    #[test]
    fn out_of_range_values_are_clamped_and_junk_ignored() {
        let parsed = AppConfig::parse_config(
            "frame_ms = 1\ntoast_ms = 999999\nnonsense\nquit = Hyper+q\nback = Esc, Left",
        );
        assert_eq!(parsed.frame_ms, 16);
        assert_eq!(parsed.toast_ms, 15_000);
        // Unparseable bindings keep the default.
        assert_eq!(parsed.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
        assert_eq!(parsed.bindings[&Action::Back].len(), 2);
    }

    #[test]
    fn back_tab_matches_with_shift_held() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::PrevSection)
        );
    }

    #[test]
    fn uppercase_character_bindings_keep_their_case() {
        assert_eq!(
            KeyBind::parse("G"),
            Some(KeyBind::new(KeyCode::Char('G'), KeyModifiers::NONE))
        );
        assert_eq!(KeyBind::parse("Ctrl+"), None);
    }
}
