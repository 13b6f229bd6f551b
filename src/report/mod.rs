//! Result aggregation and report sinks.
//!
//! All records from successful hosts are merged into one [`ReportBatch`]
//! in host-completion order (concurrent completion order is inherently
//! non-deterministic), then handed to any number of sinks behind the
//! uniform append-rows contract.

mod sqlite;
mod text;
mod xlsx;

pub use sqlite::SqliteReport;
pub use text::TextReport;
pub use xlsx::SpreadsheetReport;

use crate::error::Result;
use crate::parse::GroupRecord;
use crate::worker::HostOutcome;

/// A persistence target for group records.
///
/// Each sink receives the full record list once per run and owns its format
/// and durability. Sinks must tolerate an empty batch and still produce a
/// well-formed (header-only) artifact.
pub trait RecordSink {
    /// Append rows to the report.
    fn append_rows(&mut self, rows: &[GroupRecord]) -> Result<()>;

    /// Flush and finalize the report.
    fn finish(&mut self) -> Result<()>;
}

/// The full set of records collected across one run.
#[derive(Debug, Default)]
pub struct ReportBatch {
    records: Vec<GroupRecord>,
}

impl ReportBatch {
    /// Merge all success-outcome records, preserving completion order.
    pub fn from_outcomes(outcomes: &[HostOutcome]) -> Self {
        let records = outcomes
            .iter()
            .flat_map(|outcome| outcome.records().iter().cloned())
            .collect();
        Self { records }
    }

    /// The records, in completion order.
    pub fn records(&self) -> &[GroupRecord] {
        &self.records
    }

    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the batch through a sink and finalize it.
    pub fn write_to(&self, sink: &mut dyn RecordSink) -> Result<()> {
        sink.append_rows(&self.records)?;
        sink.finish()
    }
}
