//! Core model – effects, forms, auth client, session and festival content.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Timers and terminal events are wired up in `app`.

pub mod auth;
pub mod effects;
pub mod festival;
pub mod gate;
pub mod session;
pub mod validation;
