use crate::{
    filter::FilterTarget,
    key::{FilterKey, OwnerId},
};
use std::collections::BTreeMap;

///
/// FilterKeyRegistry
///
/// Keys one owner has pre-allocated, one per target it manages, so that
/// repeated edits replace the same remote filter instead of adding new ones.
///

#[derive(Clone, Debug, Default)]
pub struct FilterKeyRegistry {
    keys: BTreeMap<FilterTarget, FilterKey>,
}

impl FilterKeyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` for `target`, returning the key it displaced.
    pub fn set_filter_key(&mut self, target: FilterTarget, key: FilterKey) -> Option<FilterKey> {
        self.keys.insert(target, key)
    }

    #[must_use]
    pub fn get_filter_key(&self, target: &FilterTarget) -> Option<&FilterKey> {
        self.keys.get(target)
    }

    pub fn clear_filter_keys(&mut self) {
        self.keys.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilterTarget, &FilterKey)> {
        self.keys.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

///
/// KeyRegistries
///
/// Every owner's registry, held by the engine so a connection change can
/// drop them all at once.
///

#[derive(Debug, Default)]
pub struct KeyRegistries {
    owners: BTreeMap<OwnerId, FilterKeyRegistry>,
}

impl KeyRegistries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, owner: &OwnerId) -> Option<&FilterKeyRegistry> {
        self.owners.get(owner)
    }

    /// Registry for `owner`, created empty on first use.
    pub fn entry(&mut self, owner: &OwnerId) -> &mut FilterKeyRegistry {
        self.owners.entry(owner.clone()).or_default()
    }

    #[must_use]
    pub fn key_for(&self, owner: &OwnerId, target: &FilterTarget) -> Option<&FilterKey> {
        self.owners
            .get(owner)
            .and_then(|registry| registry.get_filter_key(target))
    }

    /// Drop one owner's registry.
    pub fn remove(&mut self, owner: &OwnerId) -> Option<FilterKeyRegistry> {
        self.owners.remove(owner)
    }

    /// Drop every registry, returning how many owners were cleared.
    pub fn clear(&mut self) -> usize {
        let owners = self.owners.len();
        self.owners.clear();
        owners
    }

    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }
}
