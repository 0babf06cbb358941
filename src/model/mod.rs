//! Types that represent the core data model, such as `TransactionRow` and `BucketKey`.
mod amount;
mod bucket;
mod date_range;
mod granularity;
mod mapping;
mod row;

pub use amount::{Amount, AmountError};
pub use bucket::{BucketKey, BucketKeyError};
pub use date_range::DateRange;
pub use granularity::{Granularity, Interval};
pub use mapping::{Column, KnownColumn, Mapping, MappingError};
pub use row::{TransactionRow, DEFAULT_DATE_FORMAT};
