//! ## Crate layout
//! - `config`: engine configuration and its TOML loader.
//! - `core`: clause model, filter mirror, relation and transport traits,
//!   the mutation pipeline, and observability.
//! - `utils`: naming and key helpers shared by the other crates.
//!
//! The `prelude` module holds what a widget needs to create, query, and
//! remove filters.

pub use dashfilter_config as config;
pub use dashfilter_core as core;
pub use dashfilter_utils as utils;

pub mod error;
pub mod report;

use crate::{
    config::EngineConfig,
    core::{engine::FilterEngine, relation::RelationCatalog, transport::FilterTransport},
};
use std::{path::Path, sync::Arc};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, ErrorKind};

/// Build an engine from a TOML config file.
pub fn open_engine(
    config_path: impl AsRef<Path>,
    transport: Arc<dyn FilterTransport>,
    catalog: Arc<dyn RelationCatalog>,
) -> Result<FilterEngine, Error> {
    let config = EngineConfig::load(config_path)?;

    Ok(FilterEngine::new(transport, catalog, config))
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        core::{
            engine::{MutationObserver, MutationReport, NoopObserver},
            prelude::*,
        },
        report::ReportExt as _,
    };
}
