//! Job file parser with validation
//!
//! Parses TOML and validates schema version, job name uniqueness and
//! per-job settings

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, job_validation, Result};
use crate::job::format_v0::{JobFileV0, JobSpec};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a job file from a path
///
/// Relative `dump` and `output` paths are resolved against the directory
/// containing the job file.
pub fn parse_job_file(path: &Path) -> Result<JobFileV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_job_file", path, e))?;

    let mut file = parse_job_str(&content).map_err(|e| e.with_path(path))?;

    if let Some(base) = path.parent() {
        for job in &mut file.jobs {
            if job.dump.is_relative() {
                job.dump = base.join(&job.dump);
            }
            if job.output.is_relative() {
                job.output = base.join(&job.output);
            }
        }
    }

    Ok(file)
}

/// Parse a job file from a string
pub fn parse_job_str(content: &str) -> Result<JobFileV0> {
    let file: JobFileV0 = toml::from_str(content)
        .map_err(|e| job_validation(&format!("TOML parse error: {}", e)))?;

    validate_jobs(&file)?;

    Ok(file)
}

/// Validate a parsed job file
pub fn validate_jobs(file: &JobFileV0) -> Result<()> {
    if file.schema_version != 0 {
        return Err(job_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            file.schema_version
        )));
    }

    if file.jobs.is_empty() {
        return Err(job_validation("Job file defines no [[job]] entries"));
    }

    let mut names = HashSet::new();
    for job in &file.jobs {
        validate_job(job)?;
        if !names.insert(job.name.as_str()) {
            return Err(job_validation(&format!("Duplicate job name: {}", job.name)));
        }
    }

    Ok(())
}

/// Validate the settings of a single job
pub fn validate_job(job: &JobSpec) -> Result<()> {
    if job.name.trim().is_empty() {
        return Err(job_validation("Job name must not be empty"));
    }

    let in_job = |reason: &str| job_validation(reason).with_job(job.name.clone());

    if job.table.trim().is_empty() {
        return Err(in_job("table must not be empty"));
    }
    if job.dump.as_os_str().is_empty() {
        return Err(in_job("dump must not be empty"));
    }
    if job.output.as_os_str().is_empty() {
        return Err(in_job("output must not be empty"));
    }

    if let Some(columns) = &job.columns {
        if columns.is_empty() {
            return Err(in_job("columns must not be empty when given"));
        }
        let mut seen = HashSet::new();
        for column in columns {
            if !seen.insert(column.as_str()) {
                return Err(in_job(&format!("Duplicate column: {}", column)));
            }
        }
    }

    if job.limit == Some(0) {
        return Err(in_job("limit must be greater than zero"));
    }

    if job.filters.keys().any(|column| column.is_empty()) {
        return Err(in_job("filter column must not be empty"));
    }

    if let Some(sample_columns) = &job.sample_columns {
        if sample_columns.len() != 2 {
            return Err(in_job(&format!(
                "sample_columns takes [id_column, title_column], got {} entries",
                sample_columns.len()
            )));
        }
    }

    Ok(())
}
