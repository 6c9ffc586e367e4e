//! `csv-cleaner` binary.

use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::Parser;
use csv_cleaner::logging::{LogConfig, LogFormat, init_logging};
use csv_cleaner::run::CleanRequest;

mod cli;

use crate::cli::{Cli, LogFormatArg};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    match run(&cli) {
        Ok(summary) => println!("Done. {summary}"),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut request = CleanRequest::new(&cli.input, &cli.output, &cli.config);
    request.report = cli.report.clone();
    let report = request
        .run()
        .with_context(|| format!("failed to clean {}", cli.input.display()))?;
    Ok(report.summary_line())
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: io::stderr().is_terminal(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
    }
}
