use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive window of calendar dates. An absent bound is unbounded on that side.
///
/// Callers are expected to supply `start <= end`; an inverted range is kept as-is and simply
/// matches nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// True when both bounds are present and `start > end`.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    /// Whether `date` lies within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// Whole days from `start` to `end`. Zero when either bound is absent or the range is
    /// inverted.
    pub fn span_days(&self) -> i64 {
        match (self.start, self.end) {
            (Some(s), Some(e)) => (e - s).num_days().max(0),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::between(d("2024-01-01"), d("2024-01-31"));
        assert!(range.contains(d("2024-01-01")));
        assert!(range.contains(d("2024-01-31")));
        assert!(!range.contains(d("2023-12-31")));
        assert!(!range.contains(d("2024-02-01")));
    }

    #[test]
    fn test_absent_bounds_are_unbounded() {
        let range = DateRange::new(None, Some(d("2024-01-31")));
        assert!(range.contains(d("1900-01-01")));
        assert!(!range.contains(d("2024-02-01")));
        assert!(DateRange::unbounded().contains(d("2999-12-31")));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::between(d("2024-02-01"), d("2024-01-01"));
        assert!(range.is_inverted());
        assert!(!range.contains(d("2024-01-15")));
        assert_eq!(range.span_days(), 0);
    }

    #[test]
    fn test_span_days() {
        assert_eq!(DateRange::between(d("2024-01-01"), d("2024-01-31")).span_days(), 30);
        assert_eq!(DateRange::between(d("2024-01-01"), d("2024-01-01")).span_days(), 0);
        assert_eq!(DateRange::new(Some(d("2024-01-01")), None).span_days(), 0);
    }
}
