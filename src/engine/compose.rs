//! Derives the table and chart views from a `CategoryTimeSeries`.
//!
//! Every `ChartSeries` produced here is laid over the same gap-filled axis, so a renderer can
//! plot all of them against one set of labels.

use crate::engine::aggregate::{CategorySeries, CategoryTimeSeries};
use crate::model::{BucketKey, DateRange, Interval};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cost: Decimal,
}

/// A single value on a chart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub bucket: BucketKey,
    pub value: Decimal,
}

/// A labelled line aligned to the shared bucket axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn buckets(&self) -> impl Iterator<Item = BucketKey> + '_ {
        self.points.iter().map(|p| p.bucket)
    }

    pub fn value_at(&self, key: &BucketKey) -> Option<Decimal> {
        self.points.iter().find(|p| p.bucket == *key).map(|p| p.value)
    }
}

/// Per-category totals, largest first. Ties keep first-encountered order.
pub fn category_totals(series: &CategoryTimeSeries) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = series
        .iter()
        .map(|c| CategoryTotal {
            category: c.category().to_string(),
            total_cost: c.total(),
        })
        .collect();
    totals.sort_by(|a, b| b.total_cost.cmp(&a.total_cost));
    totals
}

/// Every bucket from the one containing the start of `range` through the one containing its
/// end, whether or not anything landed there.
///
/// An absent bound is replaced by the earliest or latest bucket holding data. With no bound and
/// no data on a side, or an inverted range, the axis is empty.
pub fn axis(range: &DateRange, series: &CategoryTimeSeries, interval: Interval) -> Vec<BucketKey> {
    if range.is_inverted() {
        return Vec::new();
    }
    let extent = series.extent();
    let first = range
        .start()
        .map(|d| BucketKey::resolve(d, interval))
        .or(extent.map(|(first, _)| first));
    let last = range
        .end()
        .map(|d| BucketKey::resolve(d, interval))
        .or(extent.map(|(_, last)| last));

    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };

    let mut keys = Vec::new();
    let mut current = Some(first);
    while let Some(key) = current.filter(|k| *k <= last) {
        keys.push(key);
        current = key.next();
    }
    keys
}

/// Lays a single category over `axis`, filling gaps with zero.
pub fn align(category: &CategorySeries, axis: &[BucketKey]) -> ChartSeries {
    ChartSeries {
        label: category.category().to_string(),
        points: axis
            .iter()
            .map(|key| ChartPoint {
                bucket: *key,
                value: category.get(key),
            })
            .collect(),
    }
}

/// The sum of every category at each bucket of `axis`. This never depends on which categories
/// are selected for display.
pub fn total_series(
    series: &CategoryTimeSeries,
    axis: &[BucketKey],
    label: impl Into<String>,
) -> ChartSeries {
    ChartSeries {
        label: label.into(),
        points: axis
            .iter()
            .map(|key| ChartPoint {
                bucket: *key,
                value: series.iter().map(|c| c.get(key)).sum(),
            })
            .collect(),
    }
}

/// One aligned line per selected category, ordered as in `totals`. Selected categories with no
/// contributing rows follow, in name order, as all-zero lines.
pub fn selected_series(
    series: &CategoryTimeSeries,
    totals: &[CategoryTotal],
    axis: &[BucketKey],
    selected: &BTreeSet<String>,
) -> Vec<ChartSeries> {
    let known = totals
        .iter()
        .filter(|t| selected.contains(&t.category))
        .filter_map(|t| series.get(&t.category))
        .map(|c| align(c, axis));

    let missing = selected
        .iter()
        .filter(|name| series.get(name).is_none())
        .map(|name| ChartSeries {
            label: name.clone(),
            points: axis
                .iter()
                .map(|key| ChartPoint {
                    bucket: *key,
                    value: Decimal::ZERO,
                })
                .collect(),
        });

    known.chain(missing).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::aggregate;
    use crate::test::{d, dec, row, scenario};

    fn monthly_scenario() -> CategoryTimeSeries {
        aggregate(
            &scenario(),
            &DateRange::unbounded(),
            "Payment",
            Interval::Monthly,
        )
    }

    #[test]
    fn test_category_totals_descending() {
        let totals = category_totals(&monthly_scenario());
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Transport".to_string(),
                    total_cost: dec("20"),
                },
                CategoryTotal {
                    category: "Food".to_string(),
                    total_cost: dec("15"),
                },
            ]
        );
    }

    #[test]
    fn test_category_totals_ties_are_stable() {
        let rows = vec![
            row("2024-01-01", "B", "5"),
            row("2024-01-01", "A", "5"),
            row("2024-01-01", "C", "9"),
        ];
        let series = aggregate(&rows, &DateRange::unbounded(), "Payment", Interval::Daily);
        let names: Vec<String> = category_totals(&series)
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_axis_fills_gaps() {
        let range = DateRange::between(d("2024-01-15"), d("2024-05-02"));
        let keys = axis(&range, &CategoryTimeSeries::default(), Interval::Monthly);
        let labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            labels,
            vec!["2024-01", "2024-02", "2024-03", "2024-04", "2024-05"]
        );
    }

    #[test]
    fn test_axis_weekly_across_year_end() {
        let range = DateRange::between(d("2024-12-20"), d("2025-01-08"));
        let keys = axis(&range, &CategoryTimeSeries::default(), Interval::Weekly);
        let labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, vec!["2024-W51", "2024-W52", "2025-W01", "2025-W02"]);
    }

    #[test]
    fn test_axis_open_bounds_use_data_extent() {
        let series = aggregate(
            &scenario(),
            &DateRange::unbounded(),
            "Payment",
            Interval::Weekly,
        );
        let keys = axis(&DateRange::unbounded(), &series, Interval::Weekly);
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0].start(), d("2024-01-01"));

        let open_end = DateRange::new(Some(d("2023-12-25")), None);
        assert_eq!(axis(&open_end, &series, Interval::Weekly).len(), 4);
    }

    #[test]
    fn test_axis_empty_cases() {
        let empty = CategoryTimeSeries::default();
        assert!(axis(&DateRange::unbounded(), &empty, Interval::Daily).is_empty());
        let inverted = DateRange::between(d("2024-02-01"), d("2024-01-01"));
        assert!(axis(&inverted, &monthly_scenario(), Interval::Monthly).is_empty());
    }

    #[test]
    fn test_align_and_total() {
        let range = DateRange::between(d("2024-01-01"), d("2024-01-21"));
        let series = aggregate(&scenario(), &range, "Payment", Interval::Weekly);
        let keys = axis(&range, &series, Interval::Weekly);

        let food = align(series.get("Food").unwrap(), &keys);
        let values: Vec<Decimal> = food.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec("10"), dec("5"), dec("0")]);

        let total = total_series(&series, &keys, "TOTAL");
        let values: Vec<Decimal> = total.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec("10"), dec("5"), dec("20")]);
        assert!(food.buckets().eq(total.buckets()));
    }

    #[test]
    fn test_selected_series_order_and_unknown() {
        let series = monthly_scenario();
        let totals = category_totals(&series);
        let keys = axis(&DateRange::unbounded(), &series, Interval::Monthly);
        let selected: BTreeSet<String> = ["Food", "Transport", "Books"]
            .into_iter()
            .map(String::from)
            .collect();
        let lines = selected_series(&series, &totals, &keys, &selected);
        let labels: Vec<&str> = lines.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Transport", "Food", "Books"]);
        assert_eq!(lines[2].points.len(), keys.len());
        assert!(lines[2].points.iter().all(|p| p.value.is_zero()));
    }
}
