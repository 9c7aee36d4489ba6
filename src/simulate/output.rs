use std::path::Path;

use crate::error::Result;
use crate::simulate::SimulationReport;

/// Print the pick distribution as a table.
pub fn print_report(report: &SimulationReport) {
    println!();
    println!(
        "=== {} spins over {} eligible items ===",
        report.spins, report.eligible
    );
    println!();

    let max_name_len = report
        .counts
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(10);

    for (i, count) in report.counts.iter().enumerate() {
        println!(
            "{:>3}. {} {:<width$}  {:>6}  {:>6.2}%",
            i + 1,
            count.emoji,
            count.name,
            count.count,
            count.share * 100.0,
            width = max_name_len
        );
    }

    println!();
    println!("Back-to-back repeats: {}", report.repeats);
    println!(
        "Max deviation from uniform: {:.2}%",
        report.max_deviation() * 100.0
    );
    if !report.history.is_empty() {
        println!("Final history: {}", report.history.join(", "));
    }
    println!();
}

/// Write the distribution to a CSV file.
pub fn write_csv(report: &SimulationReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["rank", "name", "emoji", "count", "share"])?;

    for (i, count) in report.counts.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            count.name.clone(),
            count.emoji.clone(),
            count.count.to_string(),
            format!("{:.4}", count.share),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
