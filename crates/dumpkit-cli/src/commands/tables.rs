//! Table listing
//!
//! Usage: dumpkit tables <DUMP>

use clap::Args;
use dumpkit_core::{Dump, ExError};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TablesArgs {
    /// Path to the dump file
    pub dump: PathBuf,
}

pub fn execute(args: TablesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dump = Dump::load(&args.dump).map_err(ExError::from)?;

    for table in dump.tables() {
        println!("{}", table);
    }

    Ok(())
}
