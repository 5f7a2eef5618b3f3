//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the display, keypad and history panels with ratatui
//! and turns crossterm key events into calculator input.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
