//! Extract command - write the data block as a plain CSV file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use neadlint::Linter;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let linter = Linter::new();
    let outcome = linter.check_file(&file)?;

    let header: Vec<String> = outcome
        .attributes
        .get("fields")
        .cloned()
        .unwrap_or_default();

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}.clean.csv", stem))
    });

    // A half-written extract is worse than none; drop it on failure.
    if let Err(e) = write_csv(&output_path, &header, &outcome.rows) {
        let _ = fs::remove_file(&output_path);
        return Err(e);
    }

    if verbose {
        println!("  {} rows, {} columns", outcome.rows.len(), header.len());
    }
    println!(
        "{} data written to {}",
        "OK:".green().bold(),
        output_path.display()
    );
    Ok(())
}

fn write_csv(
    path: &PathBuf,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    if !header.is_empty() {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
