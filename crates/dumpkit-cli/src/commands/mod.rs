pub mod extract;
pub mod preset;
pub mod run;
pub mod schema;
pub mod tables;

use dumpkit_store::JobOutcome;

/// Print the result of one job to stdout
pub fn print_outcome(outcome: &JobOutcome, group_by: Option<&str>) {
    let report = &outcome.report;
    println!(
        "✓ {}: {} records from {} → {}",
        outcome.name,
        report.kept,
        report.table,
        outcome.output.path.display()
    );
    println!(
        "  statements: {}, tuples: {}, mismatched: {}, filtered out: {}",
        report.statements, report.tuples, report.mismatched, report.filtered_out
    );
    if report.unterminated > 0 {
        println!("  unterminated statements: {}", report.unterminated);
    }
    println!("  sha256: {}", outcome.output.sha256);

    if let (Some(column), Some(groups)) = (group_by, &outcome.groups) {
        println!("  by {}:", column);
        for (value, count) in groups {
            println!("    {}: {}", display_group(value), count);
        }
    }

    if !outcome.sample.is_empty() {
        println!("  sample:");
        for line in &outcome.sample {
            println!("    {}", line);
        }
    }
}

fn display_group(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}
