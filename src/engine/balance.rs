//! Who owes whom, from the per-person share columns.

use crate::engine::filter;
use crate::model::{DateRange, TransactionRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a participant stands after summing their shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    /// The participant has paid more than their share and is owed money.
    Owed,
    /// The participant has paid less than their share and owes money.
    Owes,
    Settled,
}

serde_plain::derive_display_from_serialize!(Standing);

impl From<Decimal> for Standing {
    fn from(balance: Decimal) -> Self {
        if balance.is_zero() {
            Standing::Settled
        } else if balance.is_sign_positive() {
            Standing::Owed
        } else {
            Standing::Owes
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonBalance {
    pub person: String,
    pub balance: Decimal,
    pub standing: Standing,
}

/// Sums each participant's signed share over the rows dated within `range`, sorted by name.
///
/// Settlement rows are included here: a payment between participants moves the balance even
/// though it is not an expense.
pub fn person_balances(rows: &[TransactionRow], range: &DateRange) -> Vec<PersonBalance> {
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for row in rows.iter().filter(|r| filter::in_range(r, range)) {
        for (person, share) in row.shares() {
            *sums.entry(person.as_str()).or_insert(Decimal::ZERO) += *share;
        }
    }
    sums.into_iter()
        .map(|(person, balance)| PersonBalance {
            person: person.to_string(),
            balance,
            standing: balance.into(),
        })
        .collect()
}

/// The balance of a single participant, or `None` if they never appear in range.
pub fn balance_of(
    rows: &[TransactionRow],
    range: &DateRange,
    person: &str,
) -> Option<PersonBalance> {
    person_balances(rows, range)
        .into_iter()
        .find(|b| b.person == person)
}
