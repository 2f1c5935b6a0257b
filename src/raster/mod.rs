//! Pixel-level drawing onto panel frame buffers.

/// BDF bitmap font parser.
pub mod bdf;
/// RGB8 colors.
pub mod color;
/// Lines, circles and text.
pub mod draw;
/// Font trait and the block fallback.
pub mod font;
/// RGBA images, anchors and blend modes.
pub mod image;
/// Owned frame buffer.
pub mod surface;
