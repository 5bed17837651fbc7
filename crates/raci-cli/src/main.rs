//! RACI Workshop Studio CLI.

use clap::{ColorChoice, Parser};
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;

use raci_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_export, run_parse, run_validate};
use crate::summary::{print_parse_summary, print_validation_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Parse(args) => match run_parse(&args) {
            Ok(parsed) => {
                print_parse_summary(&parsed);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Validate(args) => match run_validate(&args) {
            Ok((roster, run)) => {
                print_validation_summary(&roster, &run);
                if run.summary.high_severity_count() > 0 { 1 } else { 0 }
            }
            Err(error) => fail(&error),
        },
        Command::Export(args) => match run_export(&args) {
            Ok(report) => {
                println!("Wrote {}", report.written.display());
                if report.skipped > 0 {
                    eprintln!(
                        "{} writes skipped: template structure changed since parsing",
                        report.skipped
                    );
                }
                if report.unmatched > 0 {
                    eprintln!("{} parsed rows had no roster match", report.unmatched);
                }
                0
            }
            Err(error) => fail(&error),
        },
    };
    std::process::exit(exit_code);
}

fn fail(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    if config.use_env_filter {
        // RUST_LOG may raise verbosity, but never below warnings.
        config.level_filter = LevelFilter::WARN;
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    };
    config
}
