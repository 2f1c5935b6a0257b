//! Startup-time loading of fonts and images.
//!
//! All I/O happens here, outside the frame loop; programs load what they need at construction.

/// BDF font library.
pub mod fonts;
/// PNG image store.
pub mod images;
