//! TUI module for the flashcard application.

mod app;
mod mascot;
pub mod theme;
mod widgets;

pub use app::{App, Screen};
