//! List display with per-row scrolling names.

/// Row layout and drawing.
pub mod list;
/// Scroll state machine.
pub mod scroll;
