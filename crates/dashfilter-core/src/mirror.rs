//! Local mirror of the filters the remote engine has acknowledged.
//!
//! Readers may query at any time. Writes are crate-private and happen only
//! after a transport acknowledgment or on a connection reset.

use crate::{
    clause::Clause,
    filter::{FilterRecord, FilterTarget},
    key::FilterKey,
};
use dashfilter_config::EngineConfig;
use parking_lot::RwLock;
use thiserror::Error as ThisError;

///
/// MirrorError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MirrorError {
    #[error("filter '{0}' is already active; replace it instead of adding")]
    DuplicateKey(FilterKey),
}

///
/// FilterMirror
///

#[derive(Debug, Default)]
pub struct FilterMirror {
    records: RwLock<Vec<FilterRecord>>,
    config: EngineConfig,
}

impl FilterMirror {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            config,
        }
    }

    // Builder-owned filters stay hidden unless the caller asks for all.
    fn visible(&self, record: &FilterRecord, include_all: bool) -> bool {
        include_all || !self.config.is_reserved_name(&record.filter.name)
    }

    /// Filters on `target` whose every clause leaf uses one of `attributes`.
    #[must_use]
    pub fn get_filters(
        &self,
        target: &FilterTarget,
        attributes: &[&str],
        include_all: bool,
    ) -> Vec<FilterRecord> {
        self.records
            .read()
            .iter()
            .filter(|record| {
                record.target == *target
                    && self.visible(record, include_all)
                    && record.filter.clause.references_only(attributes)
            })
            .cloned()
            .collect()
    }

    /// Id of the first filter on `target` whose clause equals `clause`.
    #[must_use]
    pub fn get_filter_key(
        &self,
        target: &FilterTarget,
        clause: &Clause,
        include_all: bool,
    ) -> Option<FilterKey> {
        self.records
            .read()
            .iter()
            .find(|record| {
                record.target == *target
                    && self.visible(record, include_all)
                    && record.filter.clause.equivalent(clause)
            })
            .map(|record| record.id.clone())
    }

    #[must_use]
    pub fn get_all_filters(&self) -> Vec<FilterRecord> {
        self.records.read().clone()
    }

    #[must_use]
    pub fn filters_for_target(&self, target: &FilterTarget) -> Vec<FilterRecord> {
        self.records
            .read()
            .iter()
            .filter(|record| record.target == *target)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &FilterKey) -> Option<FilterRecord> {
        self.records
            .read()
            .iter()
            .find(|record| record.id == *id)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Record an acknowledged add. Ids are unique, so an add for a live id
    /// is rejected and the existing record is left alone.
    pub(crate) fn insert(&self, record: FilterRecord) -> Result<(), MirrorError> {
        let mut records = self.records.write();
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(MirrorError::DuplicateKey(record.id));
        }

        records.push(record);
        Ok(())
    }

    /// Record an acknowledged replace, creating the record if absent.
    pub(crate) fn upsert(&self, record: FilterRecord) -> Option<FilterRecord> {
        let mut records = self.records.write();
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => Some(std::mem::replace(existing, record)),
            None => {
                records.push(record);
                None
            }
        }
    }

    /// Record an acknowledged remove. Absent ids are a no-op.
    pub(crate) fn remove(&self, id: &FilterKey) -> Option<FilterRecord> {
        let mut records = self.records.write();
        let index = records.iter().position(|record| record.id == *id)?;

        Some(records.remove(index))
    }

    /// Drop everything, returning the number of records cleared.
    pub(crate) fn clear(&self) -> usize {
        let mut records = self.records.write();
        let cleared = records.len();
        records.clear();
        cleared
    }
}
