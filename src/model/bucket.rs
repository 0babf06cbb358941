//! Time bucket identifiers.
//!
//! A `BucketKey` stores the first calendar day of its bucket, so ordering keys is chronological
//! ordering regardless of how they render. Weekly buckets follow ISO-8601: weeks start on Monday
//! and belong to the ISO week-numbering year, so `2024-12-30` falls in `2025-W01`.

use crate::model::Interval;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifies a day, an ISO week or a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    /// Renders as `YYYY-MM-DD`.
    Day(NaiveDate),
    /// Holds the Monday of the ISO week. Renders as `YYYY-Www`.
    Week(NaiveDate),
    /// Holds the first of the month. Renders as `YYYY-MM`.
    Month(NaiveDate),
}

impl BucketKey {
    /// The bucket that contains `date` at the given `interval`.
    pub fn resolve(date: NaiveDate, interval: Interval) -> Self {
        match interval {
            Interval::Daily => BucketKey::Day(date),
            Interval::Weekly => {
                let back = u64::from(date.weekday().num_days_from_monday());
                // Only fails at the very start of chrono's representable range.
                BucketKey::Week(date.checked_sub_days(Days::new(back)).unwrap_or(date))
            }
            Interval::Monthly => BucketKey::Month(date.with_day(1).unwrap_or(date)),
        }
    }

    /// The first calendar day covered by the bucket.
    pub fn start(&self) -> NaiveDate {
        match *self {
            BucketKey::Day(d) | BucketKey::Week(d) | BucketKey::Month(d) => d,
        }
    }

    /// The bucket immediately following this one, or `None` past the end of the calendar.
    pub fn next(&self) -> Option<Self> {
        match *self {
            BucketKey::Day(d) => d.checked_add_days(Days::new(1)).map(BucketKey::Day),
            BucketKey::Week(d) => d.checked_add_days(Days::new(7)).map(BucketKey::Week),
            BucketKey::Month(d) => d.checked_add_months(Months::new(1)).map(BucketKey::Month),
        }
    }
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            BucketKey::Week(d) => {
                let week = d.iso_week();
                write!(f, "{:04}-W{:02}", week.year(), week.week())
            }
            BucketKey::Month(d) => write!(f, "{}", d.format("%Y-%m")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketKeyError(String);

impl Display for BucketKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a bucket key, expected YYYY-MM-DD, YYYY-Www or YYYY-MM",
            self.0
        )
    }
}

impl std::error::Error for BucketKeyError {}

impl FromStr for BucketKey {
    type Err = BucketKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || BucketKeyError(s.to_string());

        if let Some((year, week)) = s.split_once("-W") {
            let year: i32 = year.parse().map_err(|_| err())?;
            let week: u32 = week.parse().map_err(|_| err())?;
            return NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
                .map(BucketKey::Week)
                .ok_or_else(err);
        }

        match s.matches('-').count() {
            2 => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(BucketKey::Day)
                .map_err(|_| err()),
            1 => {
                let (year, month) = s.split_once('-').ok_or_else(err)?;
                let year: i32 = year.parse().map_err(|_| err())?;
                let month: u32 = month.parse().map_err(|_| err())?;
                NaiveDate::from_ymd_opt(year, month, 1)
                    .map(BucketKey::Month)
                    .ok_or_else(err)
            }
            _ => Err(err()),
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BucketKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BucketKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
