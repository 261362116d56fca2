//! dumpkit CLI
//!
//! Command-line interface for extracting tables from legacy MySQL dumps

use clap::{Parser, Subcommand, ValueEnum};
use dumpkit_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "dumpkit")]
#[command(about = "dumpkit - Extract tables from MySQL dump files into JSON", long_about = None)]
struct Cli {
    /// Log output format (filter with RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the tables created in a dump
    Tables(commands::tables::TablesArgs),
    /// Print the columns of a table
    Schema(commands::schema::SchemaArgs),
    /// Extract one table to JSON
    Extract(commands::extract::ExtractArgs),
    /// Run the jobs of a TOML job file
    Run(commands::run::RunArgs),
    /// Run a built-in job
    Preset(commands::preset::PresetArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Tables(args) => commands::tables::execute(args),
        Commands::Schema(args) => commands::schema::execute(args),
        Commands::Extract(args) => commands::extract::execute(args),
        Commands::Run(args) => commands::run::execute(args),
        Commands::Preset(args) => commands::preset::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
