//! package-statistics - Debian package file-ownership statistics
//!
//! Downloads `Contents-<arch>.gz` from a Debian mirror and prints the
//! packages that own the most files.

mod args;
mod error;
mod output;
mod progress;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use console::{style, StyledObject};
use debstats::{CachePolicy, Retriever, StatsEngine};

use args::{load_config, Args, Settings};
use error::CliError;
use progress::DownloadProgress;

fn main() -> ExitCode {
    let args = Args::parse();
    debstats::logging::init(if args.verbose { "debug" } else { "warn" });

    match run(&args) {
        Ok(table) => {
            print!("{}", table);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Download the index, rank its packages and render the table.
fn run(args: &Args) -> Result<String, CliError> {
    let settings = Settings::resolve(args, &load_config(args)?);
    tracing::debug!(?settings, "Resolved settings");

    let retrieval_failed = |source| CliError::Retrieval {
        arch: args.architecture.clone(),
        source,
    };

    let retriever = Retriever::from_config(settings.retriever.clone()).map_err(retrieval_failed)?;
    let progress = DownloadProgress::new(!args.no_progress && std::io::stderr().is_terminal());
    let path = retriever
        .fetch_with_progress(
            &args.architecture,
            progress.callback(format!("Contents-{}.gz", args.architecture)),
        )
        .map_err(retrieval_failed);
    progress.finish();
    let path = path?;

    let mut engine = StatsEngine::new(path).with_parse_mode(settings.parse_mode);
    let top = engine.top_packages(settings.num_packages, CachePolicy::Rebuild)?;

    Ok(output::render_table(&top))
}

/// Red "error:" label, coloured only when stderr supports it.
fn error_prefix() -> StyledObject<&'static str> {
    style("error:").for_stderr().red().bold()
}
