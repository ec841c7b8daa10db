//! Filter engine: the read-side query façade, per-owner key registries,
//! connection reset, and (in `pipeline`) the sequential mutation fan-out.

mod pipeline;
mod report;


use crate::{
    clause::Clause,
    filter::{FilterRecord, FilterTarget},
    key::{FilterKey, FilterKeyRegistry, KeyRegistries, OwnerId},
    mirror::FilterMirror,
    obs::{FilterMetricsEvent, FilterMetricsSink, NoopSink},
    relation::{Relation, RelationCatalog, resolve_targets},
    transport::FilterTransport,
};
use dashfilter_config::EngineConfig;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

// re-exports
pub use report::{MutationObserver, MutationReport, NoopObserver};

///
/// ConnectionChanged
///
/// Signal that dashboards switched data source; remote filters are gone.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectionChanged {
    pub source: String,
}

impl ConnectionChanged {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

///
/// FilterEngine
///
/// Owns the mirror and the key registries; borrows the transport and
/// relation catalog. Shared by every widget on a dashboard.
///
/// Mutations for one logical call run strictly in sequence. Separate calls
/// may interleave at transport awaits and are not serialized against each
/// other: if two calls touch the same target, the last acknowledgment wins.
///

pub struct FilterEngine {
    config: EngineConfig,
    mirror: FilterMirror,
    registries: RwLock<KeyRegistries>,
    transport: Arc<dyn FilterTransport>,
    catalog: Arc<dyn RelationCatalog>,
    sink: Arc<dyn FilterMetricsSink>,
}

impl FilterEngine {
    #[must_use]
    pub fn new(
        transport: Arc<dyn FilterTransport>,
        catalog: Arc<dyn RelationCatalog>,
        config: EngineConfig,
    ) -> Self {
        Self {
            mirror: FilterMirror::new(config.clone()),
            config,
            registries: RwLock::new(KeyRegistries::new()),
            transport,
            catalog,
            sink: Arc::new(NoopSink),
        }
    }

    #[must_use]
    pub fn with_metrics_sink(mut self, sink: Arc<dyn FilterMetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn mirror(&self) -> &FilterMirror {
        &self.mirror
    }

    // ------------------------------------------------------------------
    // Query façade
    // ------------------------------------------------------------------

    #[must_use]
    pub fn get_filters(
        &self,
        target: &FilterTarget,
        attributes: &[&str],
        include_all: bool,
    ) -> Vec<FilterRecord> {
        self.mirror.get_filters(target, attributes, include_all)
    }

    #[must_use]
    pub fn get_filter_key(
        &self,
        target: &FilterTarget,
        clause: &Clause,
        include_all: bool,
    ) -> Option<FilterKey> {
        self.mirror.get_filter_key(target, clause, include_all)
    }

    #[must_use]
    pub fn get_all_filters(&self) -> Vec<FilterRecord> {
        self.mirror.get_all_filters()
    }

    /// Relations a filter on `target` fans out to, origin first.
    #[must_use]
    pub fn relations(&self, target: &FilterTarget, attributes: &[&str]) -> Vec<Relation> {
        resolve_targets(
            self.catalog.as_ref(),
            target,
            attributes,
            self.config.fan_out_relations,
        )
    }

    // ------------------------------------------------------------------
    // Key registries
    // ------------------------------------------------------------------

    pub fn set_owner_key(&self, owner: &OwnerId, target: FilterTarget, key: FilterKey) {
        self.registries
            .write()
            .entry(owner)
            .set_filter_key(target, key);
    }

    #[must_use]
    pub fn owner_key(&self, owner: &OwnerId, target: &FilterTarget) -> Option<FilterKey> {
        self.registries.read().key_for(owner, target).cloned()
    }

    /// Drop one owner's registry; mirrored filters are untouched.
    pub fn clear_owner_keys(&self, owner: &OwnerId) {
        self.registries.write().remove(owner);
    }

    /// Read one owner's registry, if it has one.
    pub fn with_registry<R>(
        &self,
        owner: &OwnerId,
        f: impl FnOnce(Option<&FilterKeyRegistry>) -> R,
    ) -> R {
        f(self.registries.read().get(owner))
    }

    // Registered key for `target`, minting and registering one if absent.
    fn owner_key_or_mint(&self, owner: &OwnerId, target: &FilterTarget) -> FilterKey {
        let mut registries = self.registries.write();
        let registry = registries.entry(owner);
        if let Some(key) = registry.get_filter_key(target) {
            return key.clone();
        }

        let key = self.mint_key(target);
        registry.set_filter_key(target.clone(), key.clone());
        key
    }

    fn mint_key(&self, target: &FilterTarget) -> FilterKey {
        FilterKey::mint(target, &self.config.key_separator)
    }

    // ------------------------------------------------------------------
    // Connection lifecycle
    // ------------------------------------------------------------------

    /// Forget all filter state after a connection change.
    ///
    /// No transport calls are made; the previous engine's filters went away
    /// with the connection. Returns the number of mirror records cleared.
    pub fn reset(&self) -> usize {
        let cleared = self.mirror.clear();
        let owners = self.registries.write().clear();

        self.sink.record(FilterMetricsEvent::Reset {
            cleared: u64::try_from(cleared).unwrap_or(u64::MAX),
        });
        info!(cleared, owners, "connection changed; filter state cleared");

        cleared
    }

    /// Reset on every connection-change signal until the channel closes.
    pub async fn watch_connections(&self, mut events: broadcast::Receiver<ConnectionChanged>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    info!(source = %event.source, "data source connection changed");
                    self.reset();
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "connection watcher lagged; resetting once");
                    self.reset();
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}
