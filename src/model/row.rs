use crate::model::mapping::{Column, KnownColumn, Mapping};
use crate::model::Amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::trace;

/// The default date format of an expense export, e.g. `2024-01-31`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Represents a single expense record.
///
/// `date` and `cost` are `None` when the source cell could not be parsed. Such rows are kept so
/// that a bad cell never aborts an import; the engine leaves them out of every aggregate.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionRow {
    date: Option<NaiveDate>,
    description: String,
    category: String,
    cost: Option<Decimal>,
    currency: String,
    /// Each participant's signed share: positive means they are owed, negative means they owe.
    shares: BTreeMap<String, Decimal>,
}

impl TransactionRow {
    pub fn new(date: Option<NaiveDate>, category: impl Into<String>, cost: Option<Decimal>) -> Self {
        Self {
            date,
            category: category.into(),
            cost,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_share(mut self, person: impl Into<String>, share: Decimal) -> Self {
        let _ = self.shares.insert(person.into(), share);
        self
    }

    /// Builds a row from raw cells laid out according to `mapping`. Cells beyond the header row
    /// and cells under blank headers are ignored; unparsable dates, costs and shares are logged
    /// and left unset.
    pub fn new_with_mapping<S, I>(mapping: &Mapping, values: I, date_format: &str) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut row = TransactionRow::default();
        for (ix, value) in values.into_iter().enumerate() {
            match mapping.columns().get(ix) {
                Some(column) => row.set_with_column(column, value.as_ref(), date_format),
                None => trace!("Ignoring cell {ix} which has no header"),
            }
        }
        row
    }

    fn set_with_column(&mut self, column: &Column, value: &str, date_format: &str) {
        let value = value.trim();
        match column {
            Column::Known(KnownColumn::Date) => {
                self.date = match NaiveDate::parse_from_str(value, date_format) {
                    Ok(date) => Some(date),
                    Err(e) => {
                        trace!("Unparsable date '{value}': {e}");
                        None
                    }
                }
            }
            Column::Known(KnownColumn::Description) => self.description = value.to_string(),
            Column::Known(KnownColumn::Category) => self.category = value.to_string(),
            Column::Known(KnownColumn::Cost) => {
                self.cost = match Amount::from_str(value) {
                    Ok(amount) => Some(amount.value()),
                    Err(e) => {
                        trace!("Unparsable cost: {e}");
                        None
                    }
                }
            }
            Column::Known(KnownColumn::Currency) => self.currency = value.to_string(),
            Column::Person(name) => match Amount::from_str(value) {
                Ok(share) => {
                    let _ = self.shares.insert(name.clone(), share.value());
                }
                Err(e) => trace!("No share for {name}: {e}"),
            },
            Column::Blank => {}
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn cost(&self) -> Option<Decimal> {
        self.cost
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn shares(&self) -> &BTreeMap<String, Decimal> {
        &self.shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> Mapping {
        Mapping::new([
            "Date",
            "Description",
            "Category",
            "Cost",
            "Currency",
            "Alice",
            "Bob",
        ])
        .unwrap()
    }

    #[test]
    fn test_new_with_mapping() {
        let row = TransactionRow::new_with_mapping(
            &mapping(),
            [
                "2024-01-15",
                "Groceries",
                "Food",
                "42.10",
                "USD",
                "21.05",
                "-21.05",
            ],
            DEFAULT_DATE_FORMAT,
        );
        assert_eq!(row.date(), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(row.description(), "Groceries");
        assert_eq!(row.category(), "Food");
        assert_eq!(row.cost(), Some(Decimal::new(4210, 2)));
        assert_eq!(row.currency(), "USD");
        assert_eq!(row.shares().get("Alice"), Some(&Decimal::new(2105, 2)));
        assert_eq!(row.shares().get("Bob"), Some(&Decimal::new(-2105, 2)));
    }

    #[test]
    fn test_bad_cells_are_left_unset() {
        let row = TransactionRow::new_with_mapping(
            &mapping(),
            ["", "Total balance", "", "n/a", "USD", "", "3.00", "extra"],
            DEFAULT_DATE_FORMAT,
        );
        assert_eq!(row.date(), None);
        assert_eq!(row.cost(), None);
        assert!(!row.shares().contains_key("Alice"));
        assert_eq!(row.shares().get("Bob"), Some(&Decimal::new(3, 0)));
    }

    #[test]
    fn test_custom_date_format() {
        let row = TransactionRow::new_with_mapping(
            &mapping(),
            ["31/01/2024", "", "Food", "1"],
            "%d/%m/%Y",
        );
        assert_eq!(row.date(), NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_builder() {
        let row = TransactionRow::new(None, "Rent", Some(Decimal::ONE_HUNDRED))
            .with_description("March")
            .with_currency("EUR")
            .with_share("Alice", Decimal::TEN);
        assert_eq!(row.category(), "Rent");
        assert_eq!(row.description(), "March");
        assert_eq!(row.currency(), "EUR");
        assert_eq!(row.shares().len(), 1);
    }
}
