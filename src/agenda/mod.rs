//! Workshop data and the agenda program that lists it.

/// The base program.
pub mod program;
/// Workshop records and where they come from.
pub mod workshop;
