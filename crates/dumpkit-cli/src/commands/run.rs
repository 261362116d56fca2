//! Job file execution
//!
//! Usage: dumpkit run <JOBS.toml> [--only NAME]...

use clap::Args;
use dumpkit_store::errors::job_validation;
use dumpkit_store::job::parse_job_file;
use dumpkit_store::{run_jobs, JobSpec};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the TOML job file
    pub jobs: PathBuf,

    /// Run only the named job (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,
}

pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let file = parse_job_file(&args.jobs)?;
    let jobs = select(file.jobs, &args.only)?;
    tracing::debug!(jobs = jobs.len(), path = %args.jobs.display(), "Running job file");

    let summary = run_jobs(&jobs);

    for outcome in &summary.outcomes {
        let group_by = jobs
            .iter()
            .find(|j| j.name == outcome.name)
            .and_then(|j| j.group_by.as_deref());
        super::print_outcome(outcome, group_by);
    }
    for (name, err) in &summary.failures {
        eprintln!("✗ {}: {}", name, err);
    }

    if !summary.is_success() {
        return Err(format!(
            "{} of {} jobs failed",
            summary.failures.len(),
            jobs.len()
        )
        .into());
    }

    println!("✓ {} jobs, {} records", jobs.len(), summary.total_kept());
    Ok(())
}

/// Keep the jobs named in `only`, in file order; every name must exist
fn select(jobs: Vec<JobSpec>, only: &[String]) -> dumpkit_store::Result<Vec<JobSpec>> {
    if only.is_empty() {
        return Ok(jobs);
    }

    if let Some(unknown) = only.iter().find(|name| !jobs.iter().any(|j| &j.name == *name)) {
        return Err(job_validation(&format!("No job named '{}'", unknown)));
    }

    Ok(jobs.into_iter().filter(|j| only.contains(&j.name)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> Vec<JobSpec> {
        ["posts", "faq", "pages"]
            .into_iter()
            .map(|name| JobSpec::new(name, "d.sql", "t", "o.json"))
            .collect()
    }

    #[test]
    fn test_select_keeps_file_order() {
        let selected = select(jobs(), &["pages".to_string(), "posts".to_string()]).unwrap();
        let names: Vec<&str> = selected.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["posts", "pages"]);
    }

    #[test]
    fn test_select_all_when_empty() {
        assert_eq!(select(jobs(), &[]).unwrap().len(), 3);
    }

    #[test]
    fn test_select_unknown_name() {
        let err = select(jobs(), &["users".to_string()]).unwrap_err();
        assert!(err.to_string().contains("No job named 'users'"));
    }
}
