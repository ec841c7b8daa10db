use crate::obs::sink::{FilterMetricsEvent, FilterMetricsSink, WriteKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

///
/// FilterEventReport
/// Ephemeral, in-memory counters for filter mutations.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterEventReport {
    // Transport calls issued
    pub add_calls: u64,
    pub replace_calls: u64,
    pub remove_calls: u64,

    // Outcomes
    pub acknowledged: u64,
    pub failed: u64,
    pub skipped: u64,

    // Connection resets
    pub resets: u64,
    pub records_cleared: u64,
}

///
/// CountingSink
///

#[derive(Debug, Default)]
pub struct CountingSink {
    state: Mutex<FilterEventReport>,
}

impl CountingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current counters.
    #[must_use]
    pub fn report(&self) -> FilterEventReport {
        self.state.lock().clone()
    }

    pub fn reset(&self) {
        *self.state.lock() = FilterEventReport::default();
    }
}

impl FilterMetricsSink for CountingSink {
    fn record(&self, event: FilterMetricsEvent) {
        let mut m = self.state.lock();
        match event {
            FilterMetricsEvent::TransportCall { kind } => {
                let counter = match kind {
                    WriteKind::Add => &mut m.add_calls,
                    WriteKind::Replace => &mut m.replace_calls,
                    WriteKind::Remove => &mut m.remove_calls,
                };
                *counter = counter.saturating_add(1);
            }
            FilterMetricsEvent::Acknowledged { .. } => {
                m.acknowledged = m.acknowledged.saturating_add(1);
            }
            FilterMetricsEvent::Failed { .. } => m.failed = m.failed.saturating_add(1),
            FilterMetricsEvent::Skipped => m.skipped = m.skipped.saturating_add(1),
            FilterMetricsEvent::Reset { cleared } => {
                m.resets = m.resets.saturating_add(1);
                m.records_cleared = m.records_cleared.saturating_add(cleared);
            }
        }
    }
}
