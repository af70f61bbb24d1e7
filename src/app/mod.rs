//! Application orchestration: state management, event loop plumbing, input
//! handling and the background runtimes (effect timers, auth requests).

pub mod auth_runtime;
pub mod effect_runtime;
pub mod event;
pub mod handler;
pub mod state;
