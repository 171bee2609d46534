//! booktally - per-chapter word counts for EPUB books

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "booktally")]
#[command(version, about = "Count words per chapter in a directory of EPUB books", long_about = None)]
#[command(after_help = "EXAMPLES:
    booktally ~/books       Per-chapter counts into ~/books/results.txt
    booktally ~/books -c    CSV rows into ~/books/results.csv")]
struct Cli {
    /// Directory containing the .epub files to process
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Write CSV output instead of plain text
    #[arg(short = 'c', long = "csv")]
    csv: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    match booktally::run(&cli.directory, cli.csv) {
        Ok(summary) => {
            if summary.discovered > 0 && summary.failed == summary.discovered {
                eprintln!("error: no book yielded a package document");
                ExitCode::FAILURE
            } else {
                println!("wrote {}", summary.output.display());
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
