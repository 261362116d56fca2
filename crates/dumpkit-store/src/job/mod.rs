//! Extraction jobs
//!
//! Provides:
//! - Job file format v0 (TOML)
//! - Parser with validation
//! - Built-in presets

pub mod format_v0;
pub mod parser;
pub mod presets;

pub use format_v0::{JobFileV0, JobSpec};
pub use parser::{parse_job_file, parse_job_str, validate_job, validate_jobs};
pub use presets::Preset;
