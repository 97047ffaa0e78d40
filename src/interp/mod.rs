//! Gap interpolation between keyframed values.

/// Step functions and the interpolation engine.
pub mod engine;
