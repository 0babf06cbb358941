use crate::Result;
use anyhow::Context;
use std::fmt::{Display, Formatter};

/// A titled grid of cells that can be printed as Markdown or CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S, I>(title: impl Into<String>, headers: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            title: title.into(),
            headers: headers.into_iter().map(|s| s.into()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<S, I>(&mut self, row: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.rows.push(row.into_iter().map(|s| s.into()).collect());
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Renders a Markdown table preceded by its title. Columns are padded to a common width and
    /// every column but the first is right-aligned.
    pub fn to_markdown(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|ix| {
                std::iter::once(&self.headers)
                    .chain(self.rows.iter())
                    .filter_map(|r| r.get(ix))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(3)
            })
            .collect();

        let line = |cells: &[String]| {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(ix, &w)| {
                    let cell = cells.get(ix).map(String::as_str).unwrap_or("");
                    if ix == 0 {
                        format!("{cell:<w$}")
                    } else {
                        format!("{cell:>w$}")
                    }
                })
                .collect();
            format!("| {} |", padded.join(" | "))
        };

        let rule: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(ix, &w)| {
                if ix == 0 {
                    "-".repeat(w)
                } else {
                    format!("{}:", "-".repeat(w - 1))
                }
            })
            .collect();

        let mut out = Vec::with_capacity(self.rows.len() + 4);
        if !self.title.is_empty() {
            out.push(format!("### {}\n", self.title));
        }
        out.push(line(&self.headers));
        out.push(format!("| {} |", rule.join(" | ")));
        out.extend(self.rows.iter().map(|r| line(r)));
        out.join("\n")
    }

    /// Renders the headers and rows as CSV. The title is omitted.
    pub fn to_csv(&self) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.headers)
            .context("Unable to write CSV headers")?;
        for row in &self.rows {
            wtr.write_record(row).context("Unable to write CSV row")?;
        }
        let bytes = wtr.into_inner().context("Unable to flush CSV output")?;
        String::from_utf8(bytes).context("CSV output was not UTF-8")
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_markdown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new("Spending", ["Category", "Total"]);
        table.push(["Transport", "20.00"]);
        table.push(["Food, drink", "15.00"]);
        table
    }

    #[test]
    fn test_markdown() {
        let expected = "\
### Spending

| Category    | Total |
| ----------- | ----: |
| Transport   | 20.00 |
| Food, drink | 15.00 |";
        assert_eq!(sample().to_markdown(), expected);
    }

    #[test]
    fn test_csv_quotes_commas() {
        let expected = "Category,Total\nTransport,20.00\n\"Food, drink\",15.00\n";
        assert_eq!(sample().to_csv().unwrap(), expected);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new("", ["Person", "Balance"]);
        assert_eq!(
            table.to_markdown(),
            "| Person | Balance |\n| ------ | ------: |"
        );
        assert!(table.rows().is_empty());
    }
}
