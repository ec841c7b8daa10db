//! Core of dashfilter: clause model, filter keys, the acknowledgment-driven
//! filter mirror, and the engine that fans filter mutations out across
//! related tables.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod clause;
pub mod engine;
pub mod error;
pub mod filter;
pub mod key;
pub mod mirror;
pub mod obs;
pub mod relation;
pub mod transport;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Vocabulary a widget needs to create, query, and remove filters.
/// Errors, sinks, and observers stay in their own modules.
///

pub mod prelude {
    pub use crate::{
        clause::{Clause, Operator, Scalar, clauses_equal},
        engine::FilterEngine,
        filter::{Filter, FilterName, FilterRecord, FilterTarget},
        key::{FilterKey, OwnerId},
        relation::{FieldMapping, Relation, RelationCatalog},
        transport::FilterTransport,
    };
}
