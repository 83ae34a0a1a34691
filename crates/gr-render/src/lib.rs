/// Terminal output for glyphreel.
///
/// Provides the display surface trait and its ratatui implementation.
pub mod canvas;
pub mod surface;

pub use surface::{Surface, TerminalSurface};
