//! Row predicates applied before aggregation.

use crate::model::{DateRange, TransactionRow};

/// Whether the row's date lies within `range`. A row without a parsable date never matches.
pub fn in_range(row: &TransactionRow, range: &DateRange) -> bool {
    row.date().is_some_and(|date| range.contains(date))
}

/// Whether the row belongs to the excluded (settlement) category.
pub fn is_excluded(row: &TransactionRow, excluded_category: &str) -> bool {
    row.category() == excluded_category
}

/// Whether the row should contribute to category aggregates.
pub fn is_expense(row: &TransactionRow, range: &DateRange, excluded_category: &str) -> bool {
    in_range(row, range) && !is_excluded(row, excluded_category)
}
