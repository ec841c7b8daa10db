//! Transport boundary: applies filters on the remote query engine.

use crate::{error::TransportError, filter::Filter, key::FilterKey};
use async_trait::async_trait;

///
/// FilterTransport
///
/// Each call carries exactly one key (and filter) and resolves exactly once.
/// Timeouts and retries, if any, live behind this trait; the engine only
/// sees success or failure.
///

#[async_trait]
pub trait FilterTransport: Send + Sync {
    async fn add(&self, id: &FilterKey, filter: &Filter) -> Result<(), TransportError>;

    /// Replace the filter stored under `id`, creating it if absent.
    async fn replace(&self, id: &FilterKey, filter: &Filter) -> Result<(), TransportError>;

    async fn remove(&self, id: &FilterKey) -> Result<(), TransportError>;
}
