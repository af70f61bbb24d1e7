//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data and the app state and turns them into
//! cells on the terminal.  No network or file I/O happens here.

pub mod dock;
pub mod form;
pub mod gallery;
pub mod home;
pub mod layout;
pub mod particles;
pub mod reveal;
pub mod spinner;
pub mod theme;
pub mod toast;
