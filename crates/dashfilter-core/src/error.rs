use crate::{filter::FilterTarget, key::FilterKey, mirror::MirrorError};
use thiserror::Error as ThisError;

///
/// TransportError
///
/// Opaque failure reported by a transport for one call.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// FilterError
///
/// Why one target of a mutation did not apply.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),
}

///
/// TargetFailure
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("filter '{key}' on {target} failed: {error}")]
pub struct TargetFailure {
    pub target: FilterTarget,
    pub key: FilterKey,
    #[source]
    pub error: FilterError,
}
