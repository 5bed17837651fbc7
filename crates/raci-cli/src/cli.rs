//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use raci_validate::RulePolicy;

#[derive(Parser)]
#[command(
    name = "raci-studio",
    version,
    about = "RACI Workshop Studio - parse, validate, and export responsibility matrices",
    long_about = "Parse a RACI workbook template into domains, roles, and activities,\n\
                  validate assignments against the workshop rule set, and write\n\
                  current values back into the original layout for export."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a template and summarize its structure.
    Parse(ParseArgs),

    /// Validate a workshop's assignments against the rule set.
    Validate(ValidateArgs),

    /// Write current assignments back into the template layout.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Path to the workbook template.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Write the parsed records as JSON to this path.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SnapshotArgs {
    /// Workshop identifier used in issues, provenance, and actions.
    #[arg(long = "workshop", value_name = "ID", default_value_t = 1)]
    pub workshop: u64,

    /// JSON snapshot overlaying the template's seed assignments.
    #[arg(long = "assignments", value_name = "PATH")]
    pub assignments: Option<PathBuf>,

    /// JSON file supplying the recommended baseline.
    #[arg(long = "recommended", value_name = "PATH")]
    pub recommended: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PolicyArgs {
    /// Treat a missing Responsible as medium severity instead of high.
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// R/A assignments per role above which role overload is flagged.
    #[arg(
        long = "overload-threshold",
        value_name = "N",
        default_value_t = RulePolicy::DEFAULT_OVERLOAD_THRESHOLD
    )]
    pub overload_threshold: u32,
}

impl PolicyArgs {
    pub fn to_policy(&self) -> RulePolicy {
        let base = if self.lenient {
            RulePolicy::lenient()
        } else {
            RulePolicy::strict()
        };
        base.with_overload_threshold(self.overload_threshold)
    }
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the workbook template.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the workbook template.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Where to write the filled workbook.
    #[arg(long = "out", short = 'o', value_name = "PATH")]
    pub out: PathBuf,

    /// Also validate and write the derived action list as CSV.
    #[arg(long = "actions", value_name = "PATH")]
    pub actions: Option<PathBuf>,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
