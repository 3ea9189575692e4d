//! neadlint CLI - validation gate for iCSV/NEAD data files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            files,
            report_dir,
            print,
        } => commands::check::run(files, report_dir, print, cli.verbose),

        Commands::Schema { file, output } => commands::schema::run(file, output, cli.verbose),

        Commands::Extract { file, output } => commands::extract::run(file, output, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
