//! Programs, the registry that runs them and the policy that switches between them.

/// Program trait and per-frame results.
pub mod core;
/// Registry and per-frame executor.
pub mod manager;
/// Switching policy.
pub mod scheduler;
