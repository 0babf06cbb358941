//! These structs provide the CLI interface for the split-ledger CLI.

use crate::commands::OutputFormat;
use crate::model::{DateRange, Granularity};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// split-ledger: Summarize a shared-expense export by category and over time.
///
/// The input is a CSV export with `Date`, `Description`, `Category`, `Cost` and `Currency`
/// columns followed by one column per participant, which is the layout Splitwise uses. Rows in
/// the excluded category (by default `Payment`) are settlements between participants and never
/// count as expenses.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a config file holding the default settings.
    Init(InitArgs),
    /// Show category totals and the chart series for the selected categories.
    Report(ReportArgs),
    /// Show category totals, largest first.
    Categories(InputArgs),
    /// Show how much each participant owes or is owed.
    Balance(BalanceArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The config file. Defaults to ~/.split-ledger.json, which may be absent.
    #[arg(long, env = "SPLIT_LEDGER_CONFIG")]
    config: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self { log_level, config }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// (Not shown): Args for the `split-ledger init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Where to write the config file. Defaults to ~/.split-ledger.json
    #[arg(long)]
    path: Option<PathBuf>,
}

impl InitArgs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Where to read rows from and which dates to keep.
#[derive(Debug, Parser, Clone, Default)]
pub struct InputArgs {
    /// The CSV export to read. If not supplied, input will be taken from stdin.
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// The first day to include, e.g. 2024-01-01. Unbounded when omitted.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// The last day to include, e.g. 2024-12-31. Unbounded when omitted.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl InputArgs {
    pub fn new(
        file: Option<PathBuf>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        format: OutputFormat,
    ) -> Self {
        Self {
            file,
            start,
            end,
            format,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `split-ledger report` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ReportArgs {
    #[clap(flatten)]
    input: InputArgs,

    /// The bucket size. `auto` picks weekly for ranges under 30 days and monthly otherwise.
    #[arg(long, value_enum, default_value_t)]
    granularity: Granularity,

    /// A category to chart. May be repeated.
    #[arg(long = "select", short = 's')]
    selected: Vec<String>,

    /// Also chart the sum of all categories.
    #[arg(long)]
    total: bool,

    /// Override the configured settlement category.
    #[arg(long)]
    exclude: Option<String>,
}

impl ReportArgs {
    pub fn new(
        input: InputArgs,
        granularity: Granularity,
        selected: Vec<String>,
        total: bool,
        exclude: Option<String>,
    ) -> Self {
        Self {
            input,
            granularity,
            selected,
            total,
            exclude,
        }
    }

    pub fn input(&self) -> &InputArgs {
        &self.input
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn total(&self) -> bool {
        self.total
    }

    pub fn exclude(&self) -> Option<&str> {
        self.exclude.as_deref()
    }
}

/// (Not shown): Args for the `split-ledger balance` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct BalanceArgs {
    #[clap(flatten)]
    input: InputArgs,

    /// Only show this participant.
    #[arg(long)]
    person: Option<String>,
}

impl BalanceArgs {
    pub fn new(input: InputArgs, person: Option<String>) -> Self {
        Self { input, person }
    }

    pub fn input(&self) -> &InputArgs {
        &self.input
    }

    pub fn person(&self) -> Option<&str> {
        self.person.as_deref()
    }
}
