use crate::error::Error;
use dashfilter_core::engine::MutationReport;

///
/// ReportExt
///
/// Collapse a mutation report into a `Result` for callers that only care
/// whether every target applied.
///

pub trait ReportExt: Sized {
    /// Error out with the first failed target, if any.
    fn into_result(self) -> Result<MutationReport, Error>;
}

impl ReportExt for MutationReport {
    fn into_result(mut self) -> Result<Self, Error> {
        if self.failed.is_empty() {
            return Ok(self);
        }

        Err(self.failed.swap_remove(0).into())
    }
}
