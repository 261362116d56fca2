//! Built-in jobs
//!
//! Usage: dumpkit preset <wordpress-posts|qa-posts> --dump FILE [-o FILE]

use clap::Args;
use dumpkit_store::{run_job, Preset};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PresetArgs {
    /// Preset name: wordpress-posts or qa-posts
    pub preset: Preset,

    /// Path to the dump file
    #[arg(long)]
    pub dump: PathBuf,

    /// Output file (defaults to data_extraction/<preset>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: PresetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let job = args.preset.job(&args.dump, args.output.as_deref());
    let outcome = run_job(&job)?;
    super::print_outcome(&outcome, job.group_by.as_deref());
    Ok(())
}
