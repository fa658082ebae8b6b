/// Pixel geometry and re-exported `kurbo` types.
pub mod core;
/// Error types.
pub mod error;
pub(crate) mod math;
