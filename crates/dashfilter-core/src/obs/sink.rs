use std::fmt;

///
/// WriteKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteKind {
    Add,
    Replace,
    Remove,
}

impl fmt::Display for WriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Remove => "remove",
        })
    }
}

///
/// FilterMetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterMetricsEvent {
    /// A transport call was issued.
    TransportCall { kind: WriteKind },
    /// A transport call was acknowledged and mirrored.
    Acknowledged { kind: WriteKind },
    /// A target failed, at the transport or when mirroring.
    Failed { kind: WriteKind },
    /// No clause applied to a fan-out target.
    Skipped,
    /// Connection reset cleared the mirror.
    Reset { cleared: u64 },
}

///
/// FilterMetricsSink
///

pub trait FilterMetricsSink: Send + Sync {
    fn record(&self, event: FilterMetricsEvent);
}

///
/// NoopSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl FilterMetricsSink for NoopSink {
    fn record(&self, _event: FilterMetricsEvent) {}
}
