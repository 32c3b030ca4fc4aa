//! Doctor command implementation

use colored::Colorize;

use scaffold_core::{Doctor, DoctorReport};
use scaffold_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Run the doctor command
///
/// Fails (exit code 1) when any check fails.
pub fn run_doctor(root: &NormalizedPath, json: bool) -> Result<()> {
    let report = Doctor::new(root.clone()).run();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} of {} doctor checks failed",
            report.results.len()
        )));
    }
    Ok(())
}

fn print_report(report: &DoctorReport) {
    for result in &report.results {
        let status = if result.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!("{status} {}: {}", result.name, result.detail);
    }
}
