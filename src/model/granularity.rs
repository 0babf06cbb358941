use serde::{Deserialize, Serialize};

/// The bucket size requested by a view. `Auto` defers the choice to the span of the date range.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Auto,
    Daily,
    Weekly,
    Monthly,
}

serde_plain::derive_display_from_serialize!(Granularity);
serde_plain::derive_fromstr_from_deserialize!(Granularity);

impl Granularity {
    /// The concrete interval, or `None` for `Auto`.
    pub fn interval(self) -> Option<Interval> {
        match self {
            Granularity::Auto => None,
            Granularity::Daily => Some(Interval::Daily),
            Granularity::Weekly => Some(Interval::Weekly),
            Granularity::Monthly => Some(Interval::Monthly),
        }
    }
}

/// A resolved, concrete bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

serde_plain::derive_display_from_serialize!(Interval);
serde_plain::derive_fromstr_from_deserialize!(Interval);
