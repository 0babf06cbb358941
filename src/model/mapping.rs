use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MappingError(String);

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl StdError for MappingError {}

/// The fixed columns of an expense export, named exactly as they appear in the header row.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum KnownColumn {
    Date,
    Description,
    Category,
    Cost,
    Currency,
}

serde_plain::derive_display_from_serialize!(KnownColumn);
serde_plain::derive_fromstr_from_deserialize!(KnownColumn);

/// Columns that must be present for a row to be aggregated at all.
const REQUIRED: [KnownColumn; 3] = [KnownColumn::Date, KnownColumn::Category, KnownColumn::Cost];

/// What a single header in the export means.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Column {
    Known(KnownColumn),
    /// Any other named column holds one participant's signed share of the cost.
    Person(String),
    /// A header cell with no text. Its values are ignored.
    Blank,
}

impl Column {
    pub fn from_header(header: impl AsRef<str>) -> Self {
        let header = header.as_ref().trim();
        if header.is_empty() {
            return Column::Blank;
        }
        match KnownColumn::from_str(header) {
            Ok(known) => Column::Known(known),
            Err(_) => Column::Person(header.to_string()),
        }
    }
}

/// Maps the header row of an export onto `Column`s by position.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Mapping {
    headers: Vec<String>,
    columns: Vec<Column>,
}

impl Mapping {
    /// Create a new `Mapping` from the header row. Fails on duplicate headers or when a required
    /// column is missing.
    pub fn new<S, I>(headers: I) -> Result<Self, MappingError>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let headers: Vec<String> = headers.into_iter().map(|s| s.into()).collect();
        let columns: Vec<Column> = headers.iter().map(Column::from_header).collect();

        let mut seen = HashSet::new();
        for column in columns.iter().filter(|c| !matches!(c, Column::Blank)) {
            if !seen.insert(column) {
                return Err(MappingError(format!(
                    "Encountered a duplicate header {column:?}"
                )));
            }
        }

        for required in REQUIRED {
            if !columns.contains(&Column::Known(required)) {
                return Err(MappingError(format!(
                    "The header row is missing the required '{required}' column"
                )));
            }
        }

        Ok(Self { headers, columns })
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The participant names, in header order.
    pub fn people(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(|c| match c {
            Column::Person(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_header() {
        assert_eq!(
            Column::from_header("Date"),
            Column::Known(KnownColumn::Date)
        );
        assert_eq!(
            Column::from_header(" Cost "),
            Column::Known(KnownColumn::Cost)
        );
        assert_eq!(
            Column::from_header("Alice Smith"),
            Column::Person("Alice Smith".to_string())
        );
        assert_eq!(Column::from_header(""), Column::Blank);
    }

    #[test]
    fn test_splitwise_header_row() {
        let mapping = Mapping::new([
            "Date",
            "Description",
            "Category",
            "Cost",
            "Currency",
            "Alice",
            "Bob",
        ])
        .unwrap();
        assert_eq!(mapping.len(), 7);
        assert_eq!(mapping.people().collect::<Vec<_>>(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_duplicate_header() {
        let err = Mapping::new(["Date", "Category", "Cost", "Bob", "Bob"]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_blank_headers_may_repeat() {
        let mapping = Mapping::new(["", "Date", "Category", "Cost", ""]).unwrap();
        assert_eq!(mapping.people().count(), 0);
    }

    #[test]
    fn test_missing_required() {
        let err = Mapping::new(["Date", "Description", "Category"]).unwrap_err();
        assert!(err.to_string().contains("'Cost'"));
    }
}
