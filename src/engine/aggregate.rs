//! Folds rows into per-category, per-bucket cost sums.

use crate::engine::filter;
use crate::model::{BucketKey, DateRange, Interval, TransactionRow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// The summed cost of one category in each bucket that received at least one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySeries {
    category: String,
    buckets: BTreeMap<BucketKey, Decimal>,
}

impl CategorySeries {
    fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            buckets: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn buckets(&self) -> &BTreeMap<BucketKey, Decimal> {
        &self.buckets
    }

    /// The summed cost in `key`, zero when nothing landed there.
    pub fn get(&self, key: &BucketKey) -> Decimal {
        self.buckets.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.buckets.values().copied().sum()
    }
}

/// Category → bucket → summed cost, with categories kept in the order they were first
/// encountered in the input.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTimeSeries {
    categories: Vec<CategorySeries>,
}

impl CategoryTimeSeries {
    pub fn iter(&self) -> impl Iterator<Item = &CategorySeries> {
        self.categories.iter()
    }

    pub fn get(&self, category: &str) -> Option<&CategorySeries> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The earliest and latest bucket holding any value, across all categories.
    pub fn extent(&self) -> Option<(BucketKey, BucketKey)> {
        let first = self
            .categories
            .iter()
            .filter_map(|c| c.buckets.keys().next())
            .min()?;
        let last = self
            .categories
            .iter()
            .filter_map(|c| c.buckets.keys().next_back())
            .max()?;
        Some((*first, *last))
    }
}

/// Sums the cost of every row that lies in `range`, is not in `excluded_category` and has a
/// parsable cost into its category and bucket.
pub fn aggregate(
    rows: &[TransactionRow],
    range: &DateRange,
    excluded_category: &str,
    interval: Interval,
) -> CategoryTimeSeries {
    let mut categories: Vec<CategorySeries> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (ix, row) in rows.iter().enumerate() {
        if !filter::is_expense(row, range, excluded_category) {
            continue;
        }
        let (Some(date), Some(cost)) = (row.date(), row.cost()) else {
            trace!("Skipping row {ix} which has no parsable cost");
            continue;
        };

        let key = BucketKey::resolve(date, interval);
        let slot = *index.entry(row.category()).or_insert_with(|| {
            categories.push(CategorySeries::new(row.category()));
            categories.len() - 1
        });
        *categories[slot].buckets.entry(key).or_insert(Decimal::ZERO) += cost;
    }

    CategoryTimeSeries { categories }
}
