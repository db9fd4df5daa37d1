//! Immutable inputs shared by every evaluation.

pub mod context;
pub mod grid;
pub mod matrix;
pub mod stops;

/// Minutes, either as a duration or as an offset since midnight.
pub type Minutes = u64;

/// Sparse stop identifier as it appears in the use case (`HS37` -> 37).
pub type StopId = usize;
