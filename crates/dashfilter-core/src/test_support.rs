use crate::{
    engine::{MutationObserver, MutationReport},
    error::{TargetFailure, TransportError},
    filter::{Filter, FilterRecord, FilterTarget},
    key::FilterKey,
    relation::{FieldMapping, Relation, RelationCatalog},
    transport::FilterTransport,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;

///
/// TransportCall
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TransportCall {
    Add(FilterKey, Filter),
    Replace(FilterKey, Filter),
    Remove(FilterKey),
}

impl TransportCall {
    pub(crate) const fn key(&self) -> &FilterKey {
        match self {
            Self::Add(key, _) | Self::Replace(key, _) | Self::Remove(key) => key,
        }
    }
}

///
/// RecordingTransport
///
/// Acknowledges every call unless its target (or, for removes, its key)
/// has been marked as failing. A yielding transport gives the scheduler one
/// turn before answering, so concurrent callers interleave; the call log is
/// in acknowledgment order.
///

#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    yields: bool,
    calls: Mutex<Vec<TransportCall>>,
    failing_targets: Mutex<Vec<FilterTarget>>,
    failing_keys: Mutex<Vec<FilterKey>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn yielding() -> Self {
        Self {
            yields: true,
            ..Self::default()
        }
    }

    pub(crate) fn fail_target(&self, target: FilterTarget) {
        self.failing_targets.lock().push(target);
    }

    pub(crate) fn fail_key(&self, key: FilterKey) {
        self.failing_keys.lock().push(key);
    }

    pub(crate) fn heal(&self) {
        self.failing_targets.lock().clear();
        self.failing_keys.lock().clear();
    }

    pub(crate) fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    async fn respond(&self, call: TransportCall) -> Result<(), TransportError> {
        if self.yields {
            tokio::task::yield_now().await;
        }

        let failing = match &call {
            TransportCall::Add(_, filter) | TransportCall::Replace(_, filter) => {
                self.failing_targets.lock().contains(&filter.target)
            }
            TransportCall::Remove(key) => self.failing_keys.lock().contains(key),
        };
        let key = call.key().clone();
        self.calls.lock().push(call);

        if failing {
            Err(TransportError::new(format!("rejected '{key}'")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FilterTransport for RecordingTransport {
    async fn add(&self, id: &FilterKey, filter: &Filter) -> Result<(), TransportError> {
        self.respond(TransportCall::Add(id.clone(), filter.clone())).await
    }

    async fn replace(&self, id: &FilterKey, filter: &Filter) -> Result<(), TransportError> {
        self.respond(TransportCall::Replace(id.clone(), filter.clone())).await
    }

    async fn remove(&self, id: &FilterKey) -> Result<(), TransportError> {
        self.respond(TransportCall::Remove(id.clone())).await
    }
}

///
/// StaticCatalog
///
/// Relations keyed by origin target; a relation is returned when one of
/// its mappings starts from a requested attribute.
///

#[derive(Debug, Default)]
pub(crate) struct StaticCatalog {
    relations: BTreeMap<FilterTarget, Vec<Relation>>,
}

impl StaticCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn relate(
        mut self,
        origin: &FilterTarget,
        related: &FilterTarget,
        initial: &str,
        fields: &[&str],
    ) -> Self {
        let mapping = FieldMapping::new(initial, fields.iter().map(ToString::to_string).collect());
        self.relations
            .entry(origin.clone())
            .or_default()
            .push(Relation::new(related, vec![mapping]));
        self
    }
}

impl RelationCatalog for StaticCatalog {
    fn get_relations(&self, target: &FilterTarget, attributes: &[&str]) -> Vec<Relation> {
        self.relations
            .get(target)
            .into_iter()
            .flatten()
            .filter(|relation| {
                relation
                    .fields
                    .iter()
                    .any(|mapping| attributes.contains(&mapping.initial.as_str()))
            })
            .cloned()
            .collect()
    }
}

///
/// RecordingObserver
///

#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().push(event);
    }
}

impl MutationObserver for RecordingObserver {
    fn on_applied(&self, record: &FilterRecord) {
        self.push(format!("applied {}", record.target));
    }

    fn on_removed(&self, target: &FilterTarget, _key: &FilterKey) {
        self.push(format!("removed {target}"));
    }

    fn on_skipped(&self, target: &FilterTarget) {
        self.push(format!("skipped {target}"));
    }

    fn on_failed(&self, failure: &TargetFailure) {
        self.push(format!("failed {}", failure.target));
    }

    fn on_complete(&self, report: &MutationReport) {
        self.push(format!("complete {}", report.kind));
    }
}
