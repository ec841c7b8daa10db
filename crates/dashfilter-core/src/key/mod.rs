//! Filter identifiers and the per-owner registries that pre-allocate them.

mod registry;

use crate::filter::FilterTarget;
use dashfilter_utils::random_suffix;
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

// re-exports
pub use registry::{FilterKeyRegistry, KeyRegistries};

///
/// FilterKey
///
/// Opaque id of "the filter serving one purpose on one target".
///

#[derive(
    Clone,
    Debug,
    Deref,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct FilterKey(String);

impl FilterKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Allocate a fresh ad hoc key: `<database><sep><table><sep><random>`.
    #[must_use]
    pub fn mint(target: &FilterTarget, separator: &str) -> Self {
        Self(format!(
            "{}{separator}{}{separator}{}",
            target.database,
            target.table,
            random_suffix()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FilterKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FilterKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

///
/// OwnerId
///
/// Identifies the widget instance that scopes a [`FilterKeyRegistry`].
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Self {
        Self(owner.into())
    }
}

impl From<&str> for OwnerId {
    fn from(owner: &str) -> Self {
        Self::new(owner)
    }
}
