//! Reads an expense export in CSV form into `TransactionRow`s.
//!
//! The expected layout is that of a Splitwise export: `Date`, `Description`, `Category`, `Cost`
//! and `Currency` columns followed by one column per participant holding their signed share.

use crate::model::{Mapping, TransactionRow, DEFAULT_DATE_FORMAT};
use crate::{utils, Result};
use anyhow::Context;
use std::path::Path;
use tracing::{debug, trace};

/// Controls how cells are interpreted during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// A chrono format string for the `Date` column.
    date_format: String,
    /// When set, rows recorded in any other currency are dropped.
    currency: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            currency: None,
        }
    }
}

impl ImportOptions {
    pub fn new(date_format: impl Into<String>, currency: Option<String>) -> Self {
        Self {
            date_format: date_format.into(),
            currency,
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

/// Parses CSV `text` whose first line is the header row.
///
/// Rows with unparsable dates or costs are kept (they are excluded later, by the engine), so
/// trailing summary lines in an export do no harm. Only a malformed header row or unreadable
/// CSV is an error.
pub fn read_rows(text: &str, options: &ImportOptions) -> Result<Vec<TransactionRow>> {
    if text.trim().is_empty() {
        debug!("The input is empty");
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().context("Unable to read the CSV header row")?;
    let mapping = Mapping::new(headers.iter()).context("Unexpected CSV header row")?;
    trace!("Header mapping: {mapping:?}");

    let mut rows = Vec::new();
    for (ix, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Unable to read CSV line {}", ix + 2))?;
        let row = TransactionRow::new_with_mapping(&mapping, record.iter(), options.date_format());
        if let Some(currency) = options.currency() {
            if !row.currency().is_empty() && row.currency() != currency {
                debug!(
                    "Dropping line {} recorded in {} rather than {currency}",
                    ix + 2,
                    row.currency()
                );
                continue;
            }
        }
        rows.push(row);
    }
    debug!("Read {} rows", rows.len());
    Ok(rows)
}

/// Reads rows from `path`, or from stdin when no path is given.
pub async fn load_rows(path: Option<&Path>, options: &ImportOptions) -> Result<Vec<TransactionRow>> {
    let text = match path {
        Some(path) => utils::read(path).await?,
        None => utils::read_stdin().await?,
    };
    read_rows(&text, options).with_context(|| match path {
        Some(path) => format!("Unable to import {}", path.display()),
        None => String::from("Unable to import from stdin"),
    })
}
