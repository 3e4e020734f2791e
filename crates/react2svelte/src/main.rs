//! react2svelte: convert React function components into Svelte 5 components.

mod cli;
mod config;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::Result;
use output::Formatter;
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let start = Instant::now();
    let summary = orchestrator::run(&args)?;

    let report = Formatter::new(args.output).format(&summary);
    if args.stdout {
        // The document owns stdout; everything else goes to stderr.
        if let Some(document) = summary.files.iter().find_map(|f| f.document.as_deref()) {
            print!("{}", document);
        }
        if summary.failed > 0 || args.output == cli::OutputFormat::Json {
            eprint!("{}", report);
        }
    } else {
        print!("{}", report);
    }

    if args.timings {
        eprint!("{}", output::format_timings(&summary, start.elapsed()));
    }

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
