//! Schema command - build and save the schema descriptor as JSON.

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

    let Some(schema) = outcome.schema else {
        eprintln!("{}", "Cannot build schema:".red().bold());
        for finding in &outcome.metadata_findings {
            eprintln!("  {}", finding);
        }
        return Err("schema generation aborted: resolve the metadata issues first".into());
    };

    if verbose {
        for col in &schema.columns {
            println!("  {:20} {}", col.name, col.inferred_type.as_str());
        }
    }

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}.schema.json", stem))
    });
    fs::write(&output_path, serde_json::to_string_pretty(&schema)?)?;
    println!(
        "{} schema written to {}",
        "OK:".green().bold(),
        output_path.display()
    );
    Ok(())
}
