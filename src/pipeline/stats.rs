use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Running totals for one pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Batches that produced an estimate
    pub batches_ingested: usize,
    /// Batches rejected for having no usable rows
    pub batches_rejected: usize,
    /// Rows accepted across all batches
    pub rows_accepted: usize,
    /// Rows dropped by the parser across all batches
    pub rows_skipped: usize,
    /// Archive writes that failed
    pub archive_failures: usize,
}

impl fmt::Display for IngestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ingested {} batches ({} rejected), {} rows accepted, {} rows skipped, {} archive failures",
            self.batches_ingested,
            self.batches_rejected,
            self.rows_accepted,
            self.rows_skipped,
            self.archive_failures
        )
    }
}

#[derive(Debug, Default)]
pub(super) struct StatsCounters {
    batches_ingested: AtomicUsize,
    batches_rejected: AtomicUsize,
    rows_accepted: AtomicUsize,
    rows_skipped: AtomicUsize,
    archive_failures: AtomicUsize,
}

impl StatsCounters {
    pub(super) fn record_rows(&self, accepted: usize, skipped: usize) {
        self.rows_accepted.fetch_add(accepted, Ordering::Relaxed);
        self.rows_skipped.fetch_add(skipped, Ordering::Relaxed);
    }

    pub(super) fn record_ingested(&self) {
        self.batches_ingested.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_rejected(&self) {
        self.batches_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_archive_failure(&self) {
        self.archive_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn snapshot(&self) -> IngestStats {
        IngestStats {
            batches_ingested: self.batches_ingested.load(Ordering::Relaxed),
            batches_rejected: self.batches_rejected.load(Ordering::Relaxed),
            rows_accepted: self.rows_accepted.load(Ordering::Relaxed),
            rows_skipped: self.rows_skipped.load(Ordering::Relaxed),
            archive_failures: self.archive_failures.load(Ordering::Relaxed),
        }
    }
}
