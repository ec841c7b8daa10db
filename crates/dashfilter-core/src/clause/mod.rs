//! Filter clause model: comparison leaves, `and`/`or` combinators, and the
//! structural equality used to recognise an already-active filter.

mod scalar;


use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

// re-exports
pub use scalar::Scalar;

///
/// ClauseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ClauseError {
    #[error("'{kind}' clause requires at least one child clause")]
    EmptyCombinator { kind: ClauseKind },

    #[error("unknown comparison operator '{0}'")]
    UnknownOperator(String),
}

///
/// ClauseKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClauseKind {
    Where,
    And,
    Or,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Where => "where",
            Self::And => "and",
            Self::Or => "or",
        })
    }
}

///
/// Operator
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "not contains")]
    NotContains,
}

impl Operator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Contains => "contains",
            Self::NotContains => "not contains",
        }
    }
}

impl FromStr for Operator {
    type Err = ClauseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(Self::Eq),
            "!=" | "<>" => Ok(Self::Ne),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "contains" => Ok(Self::Contains),
            "not contains" => Ok(Self::NotContains),
            other => Err(ClauseError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// WhereClause
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct WhereClause {
    pub field: String,
    pub operator: Operator,
    pub value: Scalar,
}

impl WhereClause {
    #[must_use]
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Scalar>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.field == other.field
            && self.operator == other.operator
            && self.value.equivalent(&other.value)
    }
}

///
/// Clause
///
/// Predicate tree for one filter. Combinators always hold at least one
/// child; use [`Clause::and`] / [`Clause::or`] to construct them, and
/// [`Clause::validate`] for trees that arrive through deserialization.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Clause {
    Where(WhereClause),
    And { clauses: Vec<Self> },
    Or { clauses: Vec<Self> },
}

impl Clause {
    #[must_use]
    pub fn compare(field: impl Into<String>, operator: Operator, value: impl Into<Scalar>) -> Self {
        Self::Where(WhereClause::new(field, operator, value))
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::compare(field, Operator::Eq, value)
    }

    pub fn and(clauses: Vec<Self>) -> Result<Self, ClauseError> {
        if clauses.is_empty() {
            return Err(ClauseError::EmptyCombinator {
                kind: ClauseKind::And,
            });
        }

        Ok(Self::And { clauses })
    }

    pub fn or(clauses: Vec<Self>) -> Result<Self, ClauseError> {
        if clauses.is_empty() {
            return Err(ClauseError::EmptyCombinator {
                kind: ClauseKind::Or,
            });
        }

        Ok(Self::Or { clauses })
    }

    #[must_use]
    pub const fn kind(&self) -> ClauseKind {
        match self {
            Self::Where(_) => ClauseKind::Where,
            Self::And { .. } => ClauseKind::And,
            Self::Or { .. } => ClauseKind::Or,
        }
    }

    /// Check the non-empty combinator invariant over the whole tree.
    pub fn validate(&self) -> Result<(), ClauseError> {
        match self {
            Self::Where(_) => Ok(()),
            Self::And { clauses } | Self::Or { clauses } => {
                if clauses.is_empty() {
                    return Err(ClauseError::EmptyCombinator { kind: self.kind() });
                }
                clauses.iter().try_for_each(Self::validate)
            }
        }
    }

    /// Leaf field names in tree order, duplicates included.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Where(leaf) => out.push(&leaf.field),
            Self::And { clauses } | Self::Or { clauses } => {
                for clause in clauses {
                    clause.collect_fields(out);
                }
            }
        }
    }

    /// True when every leaf compares a field listed in `attributes`.
    ///
    /// A combinator only matches if all of its subtrees match, so a filter
    /// that mixes a listed and an unlisted field is not reported.
    #[must_use]
    pub fn references_only(&self, attributes: &[&str]) -> bool {
        match self {
            Self::Where(leaf) => attributes.contains(&leaf.field.as_str()),
            Self::And { clauses } | Self::Or { clauses } => {
                clauses.iter().all(|clause| clause.references_only(attributes))
            }
        }
    }

    /// Filter identity: see [`clauses_equal`].
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Where(left), Self::Where(right)) => left.equivalent(right),
            (Self::And { clauses: left }, Self::And { clauses: right })
            | (Self::Or { clauses: left }, Self::Or { clauses: right }) => {
                left.len() == right.len()
                    && left.iter().zip(right).all(|(l, r)| l.equivalent(r))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Where(leaf) => write!(f, "{} {} {}", leaf.field, leaf.operator, leaf.value),
            Self::And { clauses } | Self::Or { clauses } => {
                let joiner = format!(" {} ", self.kind());
                f.write_str("(")?;
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        f.write_str(&joiner)?;
                    }
                    write!(f, "{clause}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Structural filter equality.
///
/// Comparisons match on field, operator, and value (dates by instant).
/// Combinators match on kind and on children pairwise in order, so a
/// reordered but logically identical tree is a different filter.
#[must_use]
pub fn clauses_equal(a: &Clause, b: &Clause) -> bool {
    a.equivalent(b)
}
