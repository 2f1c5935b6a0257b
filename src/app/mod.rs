//! Frame loop that ties the clock, programs, scheduler and backend together.

/// The assembled sign.
pub mod driver;
