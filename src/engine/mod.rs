//! The expense aggregation engine.
//!
//! [`recompute`] is a pure function: the same rows and [`View`] always give a structurally
//! identical [`Summary`], and no input is ever mutated. A host that re-renders whenever an
//! input changes can call it directly, or go through [`Dashboard`] to skip the work when nothing
//! changed.
//!
//! The pipeline is
//! 1. [`filter`]: drop rows outside the date range and rows in the excluded category
//! 2. [`granularity`]: pick daily, weekly or monthly buckets
//! 3. [`aggregate`]: sum costs per category and bucket
//! 4. [`compose`]: sort category totals and lay series over a shared, gap-filled axis

pub mod aggregate;
pub mod balance;
pub mod compose;
mod dashboard;
pub mod filter;
pub mod granularity;

pub use aggregate::{CategorySeries, CategoryTimeSeries};
pub use balance::{PersonBalance, Standing};
pub use compose::{CategoryTotal, ChartPoint, ChartSeries};
pub use dashboard::Dashboard;

use crate::model::{BucketKey, DateRange, Granularity, Interval, TransactionRow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Settlement transfers between participants are recorded under this category by default.
pub const DEFAULT_EXCLUDED_CATEGORY: &str = "Payment";

/// The label of the synthesized all-categories line.
pub const DEFAULT_TOTAL_LABEL: &str = "TOTAL";

/// The parameters a user controls when looking at the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    range: DateRange,
    granularity: Granularity,
    excluded_category: String,
    selected: BTreeSet<String>,
    show_total: bool,
    total_label: String,
}

impl Default for View {
    fn default() -> Self {
        Self {
            range: DateRange::unbounded(),
            granularity: Granularity::Auto,
            excluded_category: DEFAULT_EXCLUDED_CATEGORY.to_string(),
            selected: BTreeSet::new(),
            show_total: false,
            total_label: DEFAULT_TOTAL_LABEL.to_string(),
        }
    }
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_excluded_category(mut self, category: impl Into<String>) -> Self {
        self.excluded_category = category.into();
        self
    }

    pub fn select(mut self, category: impl Into<String>) -> Self {
        let _ = self.selected.insert(category.into());
        self
    }

    pub fn with_selected<S, I>(mut self, categories: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.selected = categories.into_iter().map(|s| s.into()).collect();
        self
    }

    pub fn with_total(mut self, show_total: bool) -> Self {
        self.show_total = show_total;
        self
    }

    pub fn with_total_label(mut self, label: impl Into<String>) -> Self {
        self.total_label = label.into();
        self
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn excluded_category(&self) -> &str {
        &self.excluded_category
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn show_total(&self) -> bool {
        self.show_total
    }

    pub fn total_label(&self) -> &str {
        &self.total_label
    }
}

/// Everything a table and a chart need to render one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    interval: Interval,
    axis: Vec<BucketKey>,
    category_totals: Vec<CategoryTotal>,
    grand_total: Decimal,
    series: Vec<ChartSeries>,
}

impl Summary {
    fn empty(interval: Interval) -> Self {
        Self {
            interval,
            axis: Vec::new(),
            category_totals: Vec::new(),
            grand_total: Decimal::ZERO,
            series: Vec::new(),
        }
    }

    /// The bucket size the view resolved to.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// The bucket labels shared by every series.
    pub fn axis(&self) -> &[BucketKey] {
        &self.axis
    }

    /// Category totals, largest first.
    pub fn category_totals(&self) -> &[CategoryTotal] {
        &self.category_totals
    }

    /// The sum of every category total.
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// The selected categories' lines, followed by the total line when it was requested.
    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.category_totals.is_empty() && self.axis.is_empty()
    }
}

/// Runs the whole pipeline for `rows` as seen through `view`.
///
/// Never fails: unparsable rows are skipped, and an empty row list or an inverted date range
/// yields an empty summary.
pub fn recompute(rows: &[TransactionRow], view: &View) -> Summary {
    let range = view.range();
    let interval = granularity::select(range, view.granularity());
    if rows.is_empty() {
        debug!("No rows, nothing to aggregate");
        return Summary::empty(interval);
    }
    if range.is_inverted() {
        debug!("The date range {range:?} is inverted, nothing to aggregate");
        return Summary::empty(interval);
    }

    let series = aggregate::aggregate(rows, range, view.excluded_category(), interval);
    let category_totals = compose::category_totals(&series);
    let grand_total = category_totals.iter().map(|t| t.total_cost).sum();
    let axis = compose::axis(range, &series, interval);

    let mut lines = compose::selected_series(&series, &category_totals, &axis, view.selected());
    if view.show_total() {
        lines.push(compose::total_series(&series, &axis, view.total_label()));
    }

    debug!(
        "Aggregated {} rows into {} categories over {} {interval} buckets",
        rows.len(),
        series.len(),
        axis.len()
    );

    Summary {
        interval,
        axis,
        category_totals,
        grand_total,
        series: lines,
    }
}
