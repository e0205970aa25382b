// SPDX-License-Identifier: PMPL-1.0-or-later

//! inquest: AI-assisted code review and static analysis for Python sources
//!
//! Reviews a single file or sweeps a directory tree, scoring each source on
//! a 0-100 quality scale and reporting security, performance, style, and
//! bug findings with remediation suggestions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquest::report::{print_report, save_report, ReportOutputFormat};
use inquest::review::CodeReviewer;
use inquest::source::read_source;
use inquest::sweep;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inquest")]
#[command(version)]
#[command(about = "AI-assisted code review and static analysis for Python sources")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review a single Python source file
    Review {
        /// File to review
        #[arg(value_name = "FILE")]
        target: PathBuf,

        /// Output report to file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format for --output
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportOutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Review every Python source under a directory
    Sweep {
        /// Directory to scan
        #[arg(value_name = "DIRECTORY")]
        directory: PathBuf,

        /// Output report to file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only list files with findings
        #[arg(long)]
        findings_only: bool,

        /// Minimum number of findings to include
        #[arg(long, default_value = "0")]
        min_issues: usize,

        /// Suppress the summary table
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the built-in pattern rules
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Review {
            target,
            output,
            format,
            verbose,
        } => {
            let source = read_source(&target)?;
            if verbose {
                eprintln!(
                    "Reviewing {} ({} lines)",
                    target.display(),
                    source.lines().count()
                );
            }

            let reviewer = CodeReviewer::new();
            let report = reviewer.review(&source, &target.to_string_lossy());

            print_report(&report);

            if let Some(output_path) = output {
                save_report(&report, &output_path, format)?;
                println!("Report saved to: {}", output_path.display());
            }
        }

        Commands::Sweep {
            directory,
            output,
            findings_only,
            min_issues,
            quiet,
        } => {
            let config = sweep::SweepConfig {
                directory,
                output: output.clone(),
                findings_only,
                min_issues,
            };

            let report = sweep::run(&config)?;
            sweep::print_summary(&report, quiet);

            if let Some(output_path) = output {
                sweep::write_report(&report, &output_path)?;
                println!("Report saved to: {}", output_path.display());
            }
        }

        Commands::Rules => {
            let reviewer = CodeReviewer::new();
            let table = reviewer.rules();

            println!("Security rules:");
            for rule in table.security() {
                println!(
                    "  [{}] {} (confidence {:.2})",
                    rule.severity, rule.description, rule.confidence
                );
            }
            println!("\nPerformance rules:");
            for rule in table.performance() {
                println!(
                    "  [{}] {} (confidence {:.2})",
                    rule.severity, rule.description, rule.confidence
                );
            }
        }
    }

    Ok(())
}
