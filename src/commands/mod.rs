//! Command handlers for the split-ledger CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod balance;
mod categories;
mod init;
mod report;
mod table;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use balance::balance;
pub use categories::categories;
pub use init::init;
pub use report::report;
pub use table::Table;

/// The output type for a command. This allows the command to return a consistent message,
/// rendered output for stdout and, optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// The rendered result, printed to stdout.
    #[serde(skip)]
    body: Option<String>,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

/// How a command prints its result.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A Markdown table.
    #[default]
    Table,
    /// Pretty-printed JSON of the full structure.
    Json,
    /// CSV with a header row.
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)` and a rendered `body`.
    pub fn new<S1, S2>(message: S1, body: S2, structure: T) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            message: message.into(),
            body: Some(body.into()),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `body` and `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            body: None,
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the rendered output, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the body to stdout, the message to `info!` and the structured data (if it exists) as
    /// JSON to `debug!`.
    pub fn print(&self) {
        if let Some(body) = self.body() {
            println!("{body}");
        }
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Renders `structure` as JSON, or `tables` as Markdown or CSV, according to `format`.
pub(crate) fn render<T>(format: OutputFormat, structure: &T, tables: &[Table]) -> crate::Result<String>
where
    T: Serialize,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(structure)?),
        OutputFormat::Table => Ok(tables
            .iter()
            .map(Table::to_markdown)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Csv => Ok(tables
            .iter()
            .map(Table::to_csv)
            .collect::<crate::Result<Vec<_>>>()?
            .join("\n")),
    }
}
