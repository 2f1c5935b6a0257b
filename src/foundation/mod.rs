pub(crate) mod error;
pub(crate) mod log;
pub(crate) mod math;
