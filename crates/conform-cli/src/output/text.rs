//! Text output: one PASS/FAIL line per property on stdout, violation
//! details on stderr.

use colored::Colorize;
use conform_core::{PropertyResult, Summary, report};

pub fn status_line(result: &PropertyResult) -> String {
    if result.holds() {
        format!(
            "{} {} {} ({} file(s))",
            "PASS".green().bold(),
            result.id,
            result.name,
            result.files_checked
        )
    } else {
        format!(
            "{} {} {} ({} violation(s))",
            "FAIL".red().bold(),
            result.id,
            result.name,
            result.violations.len()
        )
    }
}

pub fn totals_line(summary: &Summary) -> String {
    format!(
        "{} properties: {} passed, {} failed",
        summary.properties, summary.passed, summary.failed
    )
}

pub fn print(summary: &Summary) {
    for result in &summary.results {
        println!("{}", status_line(result));

        let report = report(result);
        if !report.passed || !result.skipped.is_empty() {
            eprintln!("{}", report.message);
            eprintln!();
        }
    }

    println!();
    println!("{}", totals_line(summary));
}
