//! dumpkit store - jobs, output files and the extraction runner
//!
//! Provides:
//! - Job file format v0 (TOML) with parser and validation
//! - Built-in presets for the WordPress and Q&A exports
//! - Atomic JSON output with SHA-256 digests
//! - The runner that executes jobs with skip-and-continue semantics

pub mod errors;
pub mod job;
pub mod output;
pub mod runner;

// Re-export key types
pub use errors::Result;
pub use job::{JobFileV0, JobSpec, Preset};
pub use runner::{run_job, run_jobs, JobOutcome, RunSummary};
