use crate::args::InputArgs;
use crate::commands::report::totals_table;
use crate::commands::{render, Out};
use crate::engine::{recompute, CategoryTotal};
use crate::import::load_rows;
use crate::{Config, Result};

/// Category totals for the input, largest first.
pub async fn categories(config: Config, args: InputArgs) -> Result<Out<Vec<CategoryTotal>>> {
    let rows = load_rows(args.file(), &config.import_options()).await?;
    let summary = recompute(&rows, &config.view().with_range(args.range()));
    let totals = summary.category_totals().to_vec();
    let body = render(args.format(), &totals, &[totals_table(&summary)])?;
    Ok(Out::new(
        format!("{} categories", totals.len()),
        body,
        totals,
    ))
}
