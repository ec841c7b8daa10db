use crate::{
    clause::{Clause, ClauseKind},
    key::FilterKey,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FilterTarget
///
/// One queryable collection: a table inside a database.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct FilterTarget {
    pub database: String,
    pub table: String,
}

impl FilterTarget {
    #[must_use]
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for FilterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.table)
    }
}

///
/// FilterName
///
/// Display label supplied by the widget that creates a filter. Rendered once
/// per target; never part of filter identity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterName {
    Plain(String),
    Described {
        vis_name: Option<String>,
        text: Option<String>,
    },
}

impl FilterName {
    #[must_use]
    pub fn described(vis_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Described {
            vis_name: Some(vis_name.into()),
            text: Some(text.into()),
        }
    }

    /// Render to `"<vis name> - <table label>: <text>"`, dropping absent parts.
    #[must_use]
    pub fn render(&self, table_label: &str) -> String {
        match self {
            Self::Plain(name) => name.clone(),
            Self::Described { vis_name, text } => {
                let mut out = String::new();
                if let Some(vis_name) = vis_name.as_deref().filter(|s| !s.is_empty()) {
                    out.push_str(vis_name);
                    out.push_str(" - ");
                }
                out.push_str(table_label);
                if let Some(text) = text.as_deref().filter(|s| !s.is_empty()) {
                    out.push_str(": ");
                    out.push_str(text);
                }
                out
            }
        }
    }
}

impl From<&str> for FilterName {
    fn from(name: &str) -> Self {
        Self::Plain(name.to_string())
    }
}

impl From<String> for FilterName {
    fn from(name: String) -> Self {
        Self::Plain(name)
    }
}

///
/// Filter
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Filter {
    pub target: FilterTarget,
    pub clause: Clause,
    pub name: String,
}

impl Filter {
    #[must_use]
    pub fn new(target: FilterTarget, clause: Clause, name: impl Into<String>) -> Self {
        Self {
            target,
            clause,
            name: name.into(),
        }
    }
}

///
/// FilterRecord
///
/// One filter the remote engine has acknowledged, keyed by its id.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FilterRecord {
    pub id: FilterKey,
    pub target: FilterTarget,
    pub filter: Filter,
}

impl FilterRecord {
    #[must_use]
    pub fn new(id: FilterKey, filter: Filter) -> Self {
        Self {
            id,
            target: filter.target.clone(),
            filter,
        }
    }
}

#[must_use]
pub const fn has_single_clause(filter: &Filter) -> bool {
    matches!(filter.clause.kind(), ClauseKind::Where)
}

#[must_use]
pub const fn has_multiple_clauses(filter: &Filter) -> bool {
    matches!(filter.clause.kind(), ClauseKind::And | ClauseKind::Or)
}
