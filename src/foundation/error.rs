/// Convenience result type used across hitsujun.
pub type HitsujunResult<T> = Result<T, HitsujunError>;

/// Top-level error taxonomy used by the loader, extractor and renderer.
#[derive(thiserror::Error, Debug)]
pub enum HitsujunError {
    /// No asset path can be resolved for an entry, or a config value is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Asset fetch failed or returned a non-success status.
    #[error("network error{}: {cause}", status_suffix(.status))]
    Network {
        /// Status reported by the source, when it has one.
        status: Option<u16>,
        /// Human-readable cause.
        cause: String,
    },

    /// Vector markup is empty or malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl HitsujunError {
    /// Build a [`HitsujunError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`HitsujunError::Network`] value.
    pub fn network(status: Option<u16>, cause: impl Into<String>) -> Self {
        Self::Network {
            status,
            cause: cause.into(),
        }
    }

    /// Build a [`HitsujunError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`HitsujunError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Status carried by a network error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }
}

/// A raw record that carries no determinable character identity.
///
/// Rejects are per-item: batch normalization drops them and keeps going.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("record rejected: {reason}")]
pub struct NormalizationReject {
    /// Why the record was dropped.
    pub reason: String,
}

impl NormalizationReject {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
