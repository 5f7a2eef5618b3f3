//! tcalc - Terminal Calculator Library
//!
//! Builds arithmetic expressions one keypad input at a time, evaluates them
//! with a small recursive-descent parser, and keeps a bounded history.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
