//! Virtual time for the frame loop.

/// Timescaled clock shared by every component.
pub mod scaled;
/// Real-time inputs (system and manual).
pub mod source;
