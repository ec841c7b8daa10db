//! Mutation pipeline.
//!
//! Every entry point expands one request into its relation targets and
//! visits them in order, awaiting each transport call before issuing the
//! next. A failed target is reported and the loop moves on; nothing is
//! rolled back. The mirror changes only after an acknowledgment.

use crate::{
    clause::Clause,
    engine::{FilterEngine, MutationObserver, MutationReport},
    error::{FilterError, TargetFailure},
    filter::{Filter, FilterName, FilterRecord, FilterTarget},
    key::{FilterKey, OwnerId},
    obs::{FilterMetricsEvent, WriteKind},
    relation::Relation,
};
use tracing::{debug, warn};

///
/// WriteMode
///
/// The two transport writes that carry a filter body.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum WriteMode {
    Add,
    Replace,
}

impl WriteMode {
    const fn kind(self) -> WriteKind {
        match self {
            Self::Add => WriteKind::Add,
            Self::Replace => WriteKind::Replace,
        }
    }
}

impl FilterEngine {
    /// Add a filter to `target` and its related targets, or replace it if a
    /// matching filter is already active on `target`.
    ///
    /// `clause_fn` builds the clause for each visited relation; returning
    /// `None` skips that target (e.g. a related table lacks the field).
    pub async fn add_filter<F>(
        &self,
        target: &FilterTarget,
        attributes: &[&str],
        clause_fn: F,
        name: &FilterName,
        observer: &dyn MutationObserver,
    ) -> MutationReport
    where
        F: Fn(&Relation) -> Option<Clause>,
    {
        let mode = if self.mirror.get_filters(target, attributes, false).is_empty() {
            WriteMode::Add
        } else {
            WriteMode::Replace
        };
        let mut report = MutationReport::new(mode.kind());

        for relation in self.relations(target, attributes) {
            let Some(filter) = self.build_filter(&relation, &clause_fn, name) else {
                self.skip(relation.target(), &mut report, observer);
                continue;
            };

            let key = match mode {
                WriteMode::Add => self.mint_key(&filter.target),
                WriteMode::Replace => self
                    .active_key(&relation)
                    .unwrap_or_else(|| self.mint_key(&filter.target)),
            };

            self.write(mode, key, filter, &mut report, observer).await;
        }

        Self::complete(report, observer)
    }

    /// Replace the owner's filters on `target` and its related targets,
    /// using the keys pre-registered for `owner`.
    ///
    /// Targets without a registered key get a fresh one, registered before
    /// the call so later edits reuse it.
    pub async fn replace_filters<F>(
        &self,
        owner: &OwnerId,
        target: &FilterTarget,
        attributes: &[&str],
        clause_fn: F,
        name: &FilterName,
        observer: &dyn MutationObserver,
    ) -> MutationReport
    where
        F: Fn(&Relation) -> Option<Clause>,
    {
        let mut report = MutationReport::new(WriteKind::Replace);

        for relation in self.relations(target, attributes) {
            let Some(filter) = self.build_filter(&relation, &clause_fn, name) else {
                self.skip(relation.target(), &mut report, observer);
                continue;
            };

            let key = self.owner_key_or_mint(owner, &filter.target);
            self.write(WriteMode::Replace, key, filter, &mut report, observer)
                .await;
        }

        Self::complete(report, observer)
    }

    /// Remove the filters on `target` and its related targets that use
    /// `attributes`. Completes without transport calls when none are active.
    pub async fn remove_filter(
        &self,
        target: &FilterTarget,
        attributes: &[&str],
        observer: &dyn MutationObserver,
    ) -> MutationReport {
        let mut pending: Vec<(FilterTarget, FilterKey)> = Vec::new();
        for relation in self.relations(target, attributes) {
            let related = relation.related_fields();
            for record in self
                .mirror
                .get_filters(&relation.target(), &related, false)
            {
                if !pending.iter().any(|(_, key)| *key == record.id) {
                    pending.push((record.target, record.id));
                }
            }
        }

        self.remove_pending(pending, observer).await
    }

    /// Remove filters by key. Keys the mirror does not hold are treated as
    /// already removed and never reach the transport.
    pub async fn remove_filters(
        &self,
        keys: &[FilterKey],
        observer: &dyn MutationObserver,
    ) -> MutationReport {
        let mut pending: Vec<(FilterTarget, FilterKey)> = Vec::new();
        for key in keys {
            match self.mirror.get(key) {
                Some(record) if !pending.iter().any(|(_, k)| k == key) => {
                    pending.push((record.target, record.id));
                }
                Some(_) => {}
                None => debug!(key = %key, "filter not active; nothing to remove"),
            }
        }

        self.remove_pending(pending, observer).await
    }

    // ------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------

    fn build_filter<F>(
        &self,
        relation: &Relation,
        clause_fn: &F,
        name: &FilterName,
    ) -> Option<Filter>
    where
        F: Fn(&Relation) -> Option<Clause>,
    {
        let clause = clause_fn(relation)?;
        let target = relation.target();
        let label = self.catalog.table_label(&target);

        Some(Filter::new(target, clause, name.render(&label)))
    }

    // First visible filter already serving this relation's fields.
    fn active_key(&self, relation: &Relation) -> Option<FilterKey> {
        self.mirror
            .get_filters(&relation.target(), &relation.related_fields(), false)
            .into_iter()
            .next()
            .map(|record| record.id)
    }

    async fn write(
        &self,
        mode: WriteMode,
        key: FilterKey,
        filter: Filter,
        report: &mut MutationReport,
        observer: &dyn MutationObserver,
    ) {
        let kind = mode.kind();
        debug!(
            database = %filter.target.database,
            table = %filter.target.table,
            key = %key,
            clause = %filter.clause,
            "issuing filter {kind}"
        );
        self.sink.record(FilterMetricsEvent::TransportCall { kind });

        let sent = match mode {
            WriteMode::Add => self.transport.add(&key, &filter).await,
            WriteMode::Replace => self.transport.replace(&key, &filter).await,
        };

        let outcome = sent.map_err(FilterError::from).and_then(|()| {
            let record = FilterRecord::new(key.clone(), filter.clone());
            match mode {
                WriteMode::Add => self.mirror.insert(record.clone())?,
                WriteMode::Replace => {
                    self.mirror.upsert(record.clone());
                }
            }
            Ok(record)
        });

        match outcome {
            Ok(record) => {
                self.sink.record(FilterMetricsEvent::Acknowledged { kind });
                observer.on_applied(&record);
                report.applied.push(record);
            }
            Err(error) => self.fail(kind, filter.target, key, error, report, observer),
        }
    }

    async fn remove_pending(
        &self,
        pending: Vec<(FilterTarget, FilterKey)>,
        observer: &dyn MutationObserver,
    ) -> MutationReport {
        let mut report = MutationReport::new(WriteKind::Remove);

        for (target, key) in pending {
            debug!(
                database = %target.database,
                table = %target.table,
                key = %key,
                "issuing filter remove"
            );
            self.sink.record(FilterMetricsEvent::TransportCall {
                kind: WriteKind::Remove,
            });

            match self.transport.remove(&key).await {
                Ok(()) => {
                    self.mirror.remove(&key);
                    self.sink.record(FilterMetricsEvent::Acknowledged {
                        kind: WriteKind::Remove,
                    });
                    observer.on_removed(&target, &key);
                    report.removed.push(key);
                }
                Err(error) => self.fail(
                    WriteKind::Remove,
                    target,
                    key,
                    error.into(),
                    &mut report,
                    observer,
                ),
            }
        }

        Self::complete(report, observer)
    }

    fn skip(
        &self,
        target: FilterTarget,
        report: &mut MutationReport,
        observer: &dyn MutationObserver,
    ) {
        debug!(
            database = %target.database,
            table = %target.table,
            "no clause for target; skipped"
        );
        self.sink.record(FilterMetricsEvent::Skipped);
        observer.on_skipped(&target);
        report.skipped.push(target);
    }

    fn fail(
        &self,
        kind: WriteKind,
        target: FilterTarget,
        key: FilterKey,
        error: FilterError,
        report: &mut MutationReport,
        observer: &dyn MutationObserver,
    ) {
        warn!(
            database = %target.database,
            table = %target.table,
            key = %key,
            error = %error,
            "filter {kind} failed"
        );
        self.sink.record(FilterMetricsEvent::Failed { kind });

        let failure = TargetFailure { target, key, error };
        observer.on_failed(&failure);
        report.failed.push(failure);
    }

    fn complete(report: MutationReport, observer: &dyn MutationObserver) -> MutationReport {
        debug!(
            kind = %report.kind,
            applied = report.applied.len(),
            removed = report.removed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "filter mutation complete"
        );
        observer.on_complete(&report);
        report
    }
}
