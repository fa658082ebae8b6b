//! Canonical dictionary entries and the normalizer that produces them from heterogeneous records.

/// Example-usage parsing and deduplication.
pub mod examples;
/// Canonical entry model.
pub mod model;
/// Record normalization.
pub mod normalize;
