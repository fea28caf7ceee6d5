//! Per-batch outcome report for command-line ingestion runs.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::pipeline::{EstimationResult, IngestError, IngestOutcome, IngestStats};

fn summarize(result: &EstimationResult) -> String {
    format!(
        "concentration {:.3} (peak {} at #{})",
        result.concentration, result.peak_current, result.peak_index
    )
}

/// Outcome of a single batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchStatus {
    /// Estimate recorded and batch archived
    Ok(String),
    /// Estimate recorded, archival failed
    Degraded(String),
    /// No estimate recorded
    Failed(String),
}

impl BatchStatus {
    fn is_ok(&self) -> bool {
        matches!(self, BatchStatus::Ok(_))
    }

    fn is_degraded(&self) -> bool {
        matches!(self, BatchStatus::Degraded(_))
    }

    fn is_failed(&self) -> bool {
        matches!(self, BatchStatus::Failed(_))
    }
}

/// One line of the report
#[derive(Debug, Clone)]
pub struct BatchCheck {
    /// Batch label, usually the source file name
    pub name: String,
    /// What happened to the batch
    pub status: BatchStatus,
}

impl BatchCheck {
    /// Build a line from an ingest call's result
    pub fn from_ingest(name: impl Into<String>, result: &Result<IngestOutcome, IngestError>) -> Self {
        let status = match result {
            Ok(outcome) => {
                let summary = summarize(&outcome.result);
                match outcome.warning() {
                    Some(warning) => BatchStatus::Degraded(format!("{summary}; {warning}")),
                    None => BatchStatus::Ok(summary),
                }
            }
            Err(err) => BatchStatus::Failed(err.to_string()),
        };

        Self {
            name: name.into(),
            status,
        }
    }

    /// Build a line from a replay call's result
    pub fn from_replay(name: impl Into<String>, result: &Result<EstimationResult, IngestError>) -> Self {
        let status = match result {
            Ok(estimate) => BatchStatus::Ok(summarize(estimate)),
            Err(err) => BatchStatus::Failed(err.to_string()),
        };

        Self {
            name: name.into(),
            status,
        }
    }

    /// Line for a batch that failed before reaching the pipeline
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: BatchStatus::Failed(message.into()),
        }
    }
}

/// Report over a run of batches
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Individual batch lines, in ingestion order
    pub checks: Vec<BatchCheck>,
    /// Pipeline totals at the end of the run
    pub stats: IngestStats,
}

impl IngestReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch line
    pub fn add(&mut self, check: BatchCheck) {
        self.checks.push(check);
    }

    /// True if any batch produced no estimate
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Number of fully successful batches
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Number of batches recorded without archival
    pub fn degraded_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_degraded()).count()
    }

    /// Number of batches that produced no estimate
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Ingestion Report").bold().cyan()));
            output.push_str(&format!("{}\n\n", style("================").cyan()));

            for check in &self.checks {
                match &check.status {
                    BatchStatus::Ok(msg) => {
                        output.push_str(&format!("[{}] {} - {}\n", OK, style(&check.name).green(), msg));
                    }
                    BatchStatus::Degraded(msg) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            WARN,
                            style(&check.name).yellow(),
                            style("DEGRADED").yellow().bold(),
                            msg
                        ));
                    }
                    BatchStatus::Failed(msg) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            FAIL,
                            style(&check.name).red(),
                            style("FAILED").red().bold(),
                            msg
                        ));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} ok, {} degraded, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.degraded_count()).yellow(),
                style(self.failure_count()).red()
            ));
            output.push_str(&format!("{}\n", self.stats));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ingestion Report")?;
        writeln!(f, "================")?;
        writeln!(f)?;

        for check in &self.checks {
            match &check.status {
                BatchStatus::Ok(msg) => writeln!(f, "[✓] {} - {}", check.name, msg)?,
                BatchStatus::Degraded(msg) => writeln!(f, "[⚠] {} - DEGRADED: {}", check.name, msg)?,
                BatchStatus::Failed(msg) => writeln!(f, "[✗] {} - FAILED: {}", check.name, msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} ok, {} degraded, {} failed",
            self.success_count(),
            self.degraded_count(),
            self.failure_count()
        )?;
        writeln!(f, "{}", self.stats)
    }
}
