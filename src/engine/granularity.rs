use crate::model::{DateRange, Granularity, Interval};

/// Ranges spanning fewer days than this are bucketed weekly under `Granularity::Auto`; anything
/// longer is bucketed monthly.
pub const WEEKLY_SPAN_LIMIT_DAYS: i64 = 30;

/// Resolves the requested granularity to a concrete interval.
///
/// An explicit granularity always wins. For `Auto`, the whole-day span of `range` decides; a
/// range missing either bound has a span of zero and is therefore bucketed weekly.
pub fn select(range: &DateRange, granularity: Granularity) -> Interval {
    if let Some(interval) = granularity.interval() {
        return interval;
    }
    if range.span_days() < WEEKLY_SPAN_LIMIT_DAYS {
        Interval::Weekly
    } else {
        Interval::Monthly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::d;

    #[test]
    fn test_explicit_wins() {
        let long = DateRange::between(d("2020-01-01"), d("2024-01-01"));
        assert_eq!(select(&long, Granularity::Daily), Interval::Daily);
        assert_eq!(select(&long, Granularity::Weekly), Interval::Weekly);
    }

    #[test]
    fn test_auto_threshold() {
        let start = d("2024-01-01");
        let under = DateRange::between(start, d("2024-01-30"));
        let at = DateRange::between(start, d("2024-01-31"));
        assert_eq!(select(&under, Granularity::Auto), Interval::Weekly);
        assert_eq!(select(&at, Granularity::Auto), Interval::Monthly);
    }

    #[test]
    fn test_absent_bound_is_zero_span() {
        let open = DateRange::new(Some(d("2000-01-01")), None);
        assert_eq!(select(&open, Granularity::Auto), Interval::Weekly);
        assert_eq!(
            select(&DateRange::unbounded(), Granularity::Auto),
            Interval::Weekly
        );
    }

    #[test]
    fn test_widening_never_gets_finer() {
        let start = d("2024-01-01");
        let mut previous = Interval::Daily;
        for days in 0..400 {
            let end = start + chrono::Days::new(days);
            let interval = select(&DateRange::between(start, end), Granularity::Auto);
            assert!(interval >= previous, "span {days} went from {previous} to {interval}");
            previous = interval;
        }
    }
}
