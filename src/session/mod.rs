/// Composed single-character viewer.
pub mod viewer;
