//! Observability: filter metrics events and sink implementations.
//!
//! The engine never touches counters directly. All instrumentation flows
//! through `FilterMetricsEvent` into the injected `FilterMetricsSink`;
//! log lines are emitted separately through `tracing`.

mod metrics;
mod sink;

// re-exports
pub use metrics::{CountingSink, FilterEventReport};
pub use sink::{FilterMetricsEvent, FilterMetricsSink, NoopSink, WriteKind};
