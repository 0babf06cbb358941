//! Aggregates shared-expense exports (for example a Splitwise CSV export) into per-category
//! totals and gap-filled time series suitable for a chart and a table.
//!
//! The heart of the crate is [`engine::recompute`], a pure function from a list of
//! [`model::TransactionRow`]s and a [`engine::View`] to an [`engine::Summary`].

pub mod args;
pub mod commands;
mod config;
pub mod engine;
mod error;
pub mod import;
pub mod model;
mod utils;


pub use config::Config;
pub use error::Error;
pub use error::Result;
