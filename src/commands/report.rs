use crate::args::ReportArgs;
use crate::commands::{render, Out, Table};
use crate::engine::{recompute, Summary};
use crate::import::load_rows;
use crate::model::Amount;
use crate::{Config, Result};
use tracing::debug;

/// Runs the engine over the input and renders the category totals and chart series.
pub async fn report(config: Config, args: ReportArgs) -> Result<Out<Summary>> {
    let input = args.input();
    let rows = load_rows(input.file(), &config.import_options()).await?;

    let mut view = config
        .view()
        .with_range(input.range())
        .with_granularity(args.granularity())
        .with_selected(args.selected().iter().cloned())
        .with_total(args.total());
    if let Some(excluded) = args.exclude() {
        view = view.with_excluded_category(excluded);
    }
    debug!("{view:?}");

    let summary = recompute(&rows, &view);
    let tables = [totals_table(&summary), series_table(&summary)];
    let body = render(input.format(), &summary, &tables)?;
    let message = format!(
        "{} categories totalling {} over {} {} buckets",
        summary.category_totals().len(),
        Amount::new(summary.grand_total()),
        summary.axis().len(),
        summary.interval()
    );
    Ok(Out::new(message, body, summary))
}

pub(super) fn totals_table(summary: &Summary) -> Table {
    let mut table = Table::new("Category totals", ["Category", "Total"]);
    for total in summary.category_totals() {
        table.push([
            total.category.clone(),
            Amount::new(total.total_cost).to_string(),
        ]);
    }
    table
}

/// One line per bucket, one column per series.
fn series_table(summary: &Summary) -> Table {
    let headers = std::iter::once(summary.interval().to_string())
        .chain(summary.series().iter().map(|s| s.label.clone()));
    let mut table = Table::new("Series", headers);
    for (ix, key) in summary.axis().iter().enumerate() {
        let values = summary
            .series()
            .iter()
            .map(|s| s.points.get(ix).map(|p| p.value).unwrap_or_default())
            .map(|v| Amount::new(v).to_string());
        table.push(std::iter::once(key.to_string()).chain(values));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::InputArgs;
    use crate::commands::OutputFormat;
    use crate::model::Granularity;
    use crate::test::{dec, TestEnv};

    fn args(env: &TestEnv, format: OutputFormat) -> ReportArgs {
        ReportArgs::new(
            InputArgs::new(Some(env.splitwise_export()), None, None, format),
            Granularity::Monthly,
            vec!["Food".to_string()],
            true,
            None,
        )
    }

    #[tokio::test]
    async fn test_report_table() {
        let env = TestEnv::new();
        let out = report(Config::default(), args(&env, OutputFormat::Table))
            .await
            .unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.grand_total(), dec("35"));
        assert_eq!(out.message(), "2 categories totalling 35.00 over 1 monthly buckets");

        let body = out.body().unwrap();
        assert!(body.contains("| Transport |"));
        assert!(body.contains("| monthly |  Food | TOTAL |"));
        assert!(body.contains("| 2024-01 | 15.00 | 35.00 |"));
        assert!(!body.contains("Payment"));
    }

    #[tokio::test]
    async fn test_report_json() {
        let env = TestEnv::new();
        let out = report(Config::default(), args(&env, OutputFormat::Json))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(out.body().unwrap()).unwrap();
        assert_eq!(json["interval"], "monthly");
        assert_eq!(json["axis"][0], "2024-01");
        assert_eq!(json["series"][1]["label"], "TOTAL");
        assert_eq!(json["series"][1]["points"][0]["value"], "35.00");
    }

    #[tokio::test]
    async fn test_report_exclude_override() {
        let env = TestEnv::new();
        let mut a = args(&env, OutputFormat::Csv);
        a = ReportArgs::new(
            a.input().clone(),
            a.granularity(),
            Vec::new(),
            false,
            Some("Transport".to_string()),
        );
        let out = report(Config::default(), a).await.unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.grand_total(), dec("65"));
        assert!(out.body().unwrap().starts_with("Category,Total\nPayment,50.00\n"));
    }
}
