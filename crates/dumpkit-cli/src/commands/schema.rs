//! Column listing for one table
//!
//! Usage: dumpkit schema <DUMP> <TABLE>

use clap::Args;
use dumpkit_core::{Dump, ExError, ExErrorKind};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Path to the dump file
    pub dump: PathBuf,

    /// Table name
    pub table: String,
}

pub fn execute(args: SchemaArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dump = Dump::load(&args.dump).map_err(ExError::from)?;

    let schema = dump.schema(&args.table).ok_or_else(|| {
        ExError::new(ExErrorKind::NotFound)
            .with_op("schema")
            .with_table(args.table.clone())
            .with_path(&args.dump)
            .with_message("No CREATE TABLE for table")
    })?;

    for (position, column) in schema.columns.iter().enumerate() {
        println!("{:>3}  {}", position + 1, column);
    }

    Ok(())
}
