//! Job runner
//!
//! Executes extraction jobs end to end: load the dump, extract the table,
//! write the JSON output and collect the summaries printed by the CLI.
//!
//! A failing job never stops the ones after it. Failures are logged with
//! their error code and collected in the [`RunSummary`].

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::job::JobSpec;
use crate::output::{write_records, WrittenOutput};
use dumpkit_core_types::RunId;
use dumpkit_core::errors::ExError;
use dumpkit_core::report::{group_counts, sample_lines};
use dumpkit_core::{log_op_end, log_op_error, log_op_start, Dump, ExtractReport};
use std::time::Instant;

/// What one successful job produced
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub name: String,
    pub run_id: RunId,
    pub output: WrittenOutput,
    pub report: ExtractReport,
    /// Per-value counts when the job sets `group_by`
    pub groups: Option<Vec<(String, usize)>>,
    /// `[id] title` lines for the first records
    pub sample: Vec<String>,
}

/// Result of running a list of jobs
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<JobOutcome>,
    /// Job name and error, in run order
    pub failures: Vec<(String, ExError)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records written across all successful jobs
    pub fn total_kept(&self) -> usize {
        self.outcomes.iter().map(|o| o.report.kept).sum()
    }
}

/// Run a single job
///
/// All log lines emitted while the job runs carry its `run_id` and name.
pub fn run_job(job: &JobSpec) -> Result<JobOutcome> {
    let run_id = RunId::new();
    let span = tracing::info_span!("job", run_id = %run_id, job = %job.name);
    let _entered = span.enter();

    let started = Instant::now();
    log_op_start!(
        "run_job",
        table = job.table.as_str(),
        path = %job.dump.display(),
    );

    match execute(job, run_id) {
        Ok(outcome) => {
            log_op_end!(
                "run_job",
                duration_ms = started.elapsed().as_millis() as u64,
                kept = outcome.report.kept,
                mismatched = outcome.report.mismatched,
                sha256 = outcome.output.sha256.as_str(),
            );
            Ok(outcome)
        }
        Err(err) => {
            log_op_error!(
                "run_job",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64,
            );
            Err(err)
        }
    }
}

fn execute(job: &JobSpec, run_id: RunId) -> Result<JobOutcome> {
    let dump = Dump::load(&job.dump).map_err(|e| job.tag(e))?;

    let extraction = dump
        .extract(&job.table, &job.extract_options())
        .map_err(|e| job.tag(ExError::from(e).with_table(job.table.clone())))?;

    let output =
        write_records(&job.output, &extraction.records, job.envelope).map_err(|e| job.tag(e))?;

    let groups = job
        .group_by
        .as_deref()
        .map(|column| group_counts(&extraction.records, column));

    let (id_columns, title_columns) = job.sample_columns();
    let sample = sample_lines(
        &extraction.records,
        job.sample,
        &id_columns,
        &title_columns,
    );

    Ok(JobOutcome {
        name: job.name.clone(),
        run_id,
        output,
        report: extraction.report,
        groups,
        sample,
    })
}

/// Run every job in order, continuing past failures
pub fn run_jobs(jobs: &[JobSpec]) -> RunSummary {
    let mut summary = RunSummary::default();

    for job in jobs {
        match run_job(job) {
            Ok(outcome) => summary.outcomes.push(outcome),
            Err(err) => {
                tracing::warn!(job = %job.name, code = err.code(), "Job failed, continuing");
                summary.failures.push((job.name.clone(), err));
            }
        }
    }

    tracing::info!(
        succeeded = summary.outcomes.len(),
        failed = summary.failures.len(),
        kept = summary.total_kept(),
        "Run complete"
    );
    summary
}
