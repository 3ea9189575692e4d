//! Check command - validate a batch of files and write per-file reports.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use neadlint::{Finding, Linter, Severity};

pub fn run(
    files: Vec<PathBuf>,
    report_dir: Option<PathBuf>,
    print: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let linter = Linter::new();
    let mut failed = 0usize;
    let mut skipped = 0usize;

    for file in &files {
        if !file.exists() {
            println!(
                "{} {}: file not found",
                "Skipping".yellow().bold(),
                file.display()
            );
            skipped += 1;
            continue;
        }

        println!(
            "{} {}",
            "Checking".cyan().bold(),
            file.display().to_string().white()
        );

        // One broken file never stops the rest of the batch.
        let outcome = match linter.check_file(file) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("  {}", Finding::unreadable(e.to_string()));
                failed += 1;
                continue;
            }
        };

        if verbose {
            if let Some(schema) = &outcome.schema {
                println!();
                println!("{}", "Schema:".yellow().bold());
                for col in &schema.columns {
                    println!("  {:20} {}", col.name, col.inferred_type.as_str());
                }
                println!();
            }
        }

        let error_count = outcome
            .metadata_findings
            .iter()
            .chain(outcome.data_findings.iter())
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warning_count = outcome
            .metadata_findings
            .iter()
            .chain(outcome.data_findings.iter())
            .filter(|f| f.severity == Severity::Warning)
            .count();

        let status = if outcome.passed() {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!(
            "  {} ({} errors, {} warnings, {} rows)",
            status,
            error_count.to_string().red(),
            warning_count.to_string().yellow(),
            outcome.source.row_count
        );

        if print {
            println!("{}", outcome.report);
        } else {
            let report_path = report_path(file, report_dir.as_deref());
            // A report-write failure counts against this file only.
            if let Err(e) = fs::write(&report_path, &outcome.report) {
                eprintln!(
                    "  {} cannot write {}: {}",
                    "failed:".red().bold(),
                    report_path.display(),
                    e
                );
                failed += 1;
                continue;
            }
            println!("  Report written to {}", report_path.display());
        }

        if !outcome.passed() {
            failed += 1;
        }
    }

    if failed > 0 || skipped > 0 {
        return Err(format!("{} file(s) failed, {} skipped", failed, skipped).into());
    }
    Ok(())
}

fn report_path(file: &Path, report_dir: Option<&Path>) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    let name = format!("{}.report.txt", stem);
    match report_dir {
        Some(dir) => dir.join(name),
        None => file.with_file_name(name),
    }
}
