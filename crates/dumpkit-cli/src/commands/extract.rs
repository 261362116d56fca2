//! Single-table extraction
//!
//! Usage: dumpkit extract <DUMP> <TABLE> [-o FILE] [--where COL=VAL]...
//!        [--columns a,b] [--unescape-html] [--limit N] [--sample N]
//!        [--group-by COL] [--envelope]
//!
//! Without `-o` the JSON goes to stdout and summaries to stderr.

use clap::Args;
use dumpkit_core::report::{group_counts, sample_lines};
use dumpkit_core::{Dump, ExError, RowFilter};
use dumpkit_store::job::validate_job;
use dumpkit_store::output::render_records;
use dumpkit_store::{run_job, JobSpec};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Path to the dump file
    pub dump: PathBuf,

    /// Table to extract
    pub table: String,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep only rows where COL renders as VAL (repeatable)
    #[arg(long = "where", value_name = "COL=VAL")]
    pub filters: Vec<RowFilter>,

    /// Comma-separated column names overriding the dump's own
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Decode HTML entities in string values
    #[arg(long)]
    pub unescape_html: bool,

    /// Stop after N records
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print N sample records
    #[arg(long)]
    pub sample: Option<usize>,

    /// Print per-value counts of COL
    #[arg(long, value_name = "COL")]
    pub group_by: Option<String>,

    /// Wrap records as {"count": N, "records": [...]}
    #[arg(long)]
    pub envelope: bool,
}

impl ExtractArgs {
    fn to_job(&self) -> JobSpec {
        let output = self.output.clone().unwrap_or_else(|| PathBuf::from("-"));
        let mut job = JobSpec::new("extract", self.dump.clone(), self.table.clone(), output);
        job.columns = self.columns.clone();
        job.filters = self
            .filters
            .iter()
            .map(|f| (f.column.clone(), f.expected.clone()))
            .collect();
        job.unescape_html = self.unescape_html;
        job.limit = self.limit;
        job.group_by = self.group_by.clone();
        job.envelope = self.envelope;
        job.sample = self.sample.unwrap_or(0);
        job
    }
}

pub fn execute(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let job = args.to_job();
    validate_job(&job)?;

    if args.output.is_some() {
        let outcome = run_job(&job)?;
        super::print_outcome(&outcome, job.group_by.as_deref());
        return Ok(());
    }

    let dump = Dump::load(&job.dump).map_err(ExError::from)?;
    let extraction = dump
        .extract(&job.table, &job.extract_options())
        .map_err(|e| ExError::from(e).with_table(job.table.clone()))?;

    let bytes = render_records(&extraction.records, job.envelope)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;

    let report = &extraction.report;
    eprintln!(
        "✓ {} records from {} ({} tuples, {} mismatched, {} filtered out)",
        report.kept, report.table, report.tuples, report.mismatched, report.filtered_out
    );
    if let Some(column) = &job.group_by {
        for (value, count) in group_counts(&extraction.records, column) {
            eprintln!("  {}={}: {}", column, value, count);
        }
    }
    let (id_columns, title_columns) = job.sample_columns();
    for line in sample_lines(&extraction.records, job.sample, &id_columns, &title_columns) {
        eprintln!("  {}", line);
    }

    Ok(())
}
