//! Run-length-encoded value timelines.

/// The run-length timeline and its runs.
pub mod track;
/// Dynamically-typed attribute values and their kind registry.
pub mod value;
