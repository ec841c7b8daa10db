use dashfilter_config::ConfigError;
use dashfilter_core::error::{FilterError, TargetFailure};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, err.to_string())
    }
}

impl From<TargetFailure> for Error {
    fn from(failure: TargetFailure) -> Self {
        let kind = match failure.error {
            FilterError::Transport(_) => ErrorKind::Transport,
            FilterError::Mirror(_) => ErrorKind::Mirror,
        };

        Self::new(kind, failure.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Config,
    Transport,
    Mirror,
}
