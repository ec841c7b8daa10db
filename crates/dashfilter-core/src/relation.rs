//! Relation catalog boundary.
//!
//! The catalog is owned by the dataset layer; the engine only reads it to
//! decide which targets a filter fans out to.

use crate::filter::FilterTarget;
use dashfilter_utils::title_case;
use serde::{Deserialize, Serialize};

///
/// FieldMapping
///
/// Filtering `initial` on the origin implies filtering `related` here.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldMapping {
    pub initial: String,
    pub related: Vec<String>,
}

impl FieldMapping {
    #[must_use]
    pub fn new(initial: impl Into<String>, related: Vec<String>) -> Self {
        Self {
            initial: initial.into(),
            related,
        }
    }
}

///
/// Relation
///
/// One target a filter must reach, with the fields it maps onto there.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Relation {
    pub database: String,
    pub table: String,
    pub fields: Vec<FieldMapping>,
}

impl Relation {
    #[must_use]
    pub fn new(target: &FilterTarget, fields: Vec<FieldMapping>) -> Self {
        Self {
            database: target.database.clone(),
            table: target.table.clone(),
            fields,
        }
    }

    /// The origin itself, each attribute mapped onto itself.
    #[must_use]
    pub fn origin(target: &FilterTarget, attributes: &[&str]) -> Self {
        let fields = attributes
            .iter()
            .map(|attr| FieldMapping::new(*attr, vec![(*attr).to_string()]))
            .collect();

        Self::new(target, fields)
    }

    #[must_use]
    pub fn target(&self) -> FilterTarget {
        FilterTarget::new(self.database.clone(), self.table.clone())
    }

    #[must_use]
    pub fn is_target(&self, target: &FilterTarget) -> bool {
        self.database == target.database && self.table == target.table
    }

    /// All related field names, first occurrence order, without duplicates.
    #[must_use]
    pub fn related_fields(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for field in self.fields.iter().flat_map(|mapping| &mapping.related) {
            if !out.contains(&field.as_str()) {
                out.push(field);
            }
        }
        out
    }

    /// First related field mapped from `initial`.
    #[must_use]
    pub fn related_field(&self, initial: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|mapping| mapping.initial == initial)
            .and_then(|mapping| mapping.related.first())
            .map(String::as_str)
    }
}

///
/// RelationCatalog
///

pub trait RelationCatalog: Send + Sync {
    /// Targets related to `target` through any of `attributes`.
    fn get_relations(&self, target: &FilterTarget, attributes: &[&str]) -> Vec<Relation>;

    /// Human-readable table name used when rendering filter names.
    fn table_label(&self, target: &FilterTarget) -> String {
        title_case(&target.table)
    }
}

///
/// NoRelations
///
/// Catalog for dashboards without declared relations.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoRelations;

impl RelationCatalog for NoRelations {
    fn get_relations(&self, _target: &FilterTarget, _attributes: &[&str]) -> Vec<Relation> {
        Vec::new()
    }
}

/// Expand one request into the ordered list of relations to visit.
///
/// The origin always comes first. Catalog relations that point back at the
/// origin or repeat an earlier target are dropped.
#[must_use]
pub fn resolve_targets(
    catalog: &dyn RelationCatalog,
    target: &FilterTarget,
    attributes: &[&str],
    fan_out: bool,
) -> Vec<Relation> {
    let mut resolved = vec![Relation::origin(target, attributes)];
    if !fan_out {
        return resolved;
    }

    for relation in catalog.get_relations(target, attributes) {
        let seen = resolved
            .iter()
            .any(|known| known.database == relation.database && known.table == relation.table);
        if !seen {
            resolved.push(relation);
        }
    }

    resolved
}
