//! Application layer managing calculator state and workflows.
//!
//! This module sits between the pure calculator core and the terminal
//! front end: it owns the live expression, the history and the UI mode.

pub mod state;

pub use state::*;
