//! Infrastructure layer providing external service integrations.
//!
//! Settings files, CSV export, the system clipboard and log output live
//! here, away from the pure calculator core.

pub mod clipboard;
pub mod export;
pub mod logging;
pub mod persistence;

pub use clipboard::*;
pub use export::*;
pub use logging::*;
pub use persistence::*;
