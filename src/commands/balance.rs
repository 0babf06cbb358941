use crate::args::BalanceArgs;
use crate::commands::{render, Out, Table};
use crate::engine::balance::{balance_of, person_balances};
use crate::engine::PersonBalance;
use crate::import::load_rows;
use crate::model::Amount;
use crate::{Config, Result};
use anyhow::bail;

/// Each participant's net position over the input, or a single participant's with `--person`.
pub async fn balance(config: Config, args: BalanceArgs) -> Result<Out<Vec<PersonBalance>>> {
    let input = args.input();
    let rows = load_rows(input.file(), &config.import_options()).await?;
    let range = input.range();

    let balances = match args.person() {
        None => person_balances(&rows, &range),
        Some(person) => match balance_of(&rows, &range, person) {
            Some(b) => vec![b],
            None => bail!("'{person}' does not appear in the input"),
        },
    };

    let mut table = Table::new("Balances", ["Person", "Balance", "Standing"]);
    for b in &balances {
        table.push([
            b.person.clone(),
            Amount::new(b.balance).to_string(),
            b.standing.to_string(),
        ]);
    }
    let body = render(input.format(), &balances, &[table])?;
    Ok(Out::new(
        format!("Balances for {} participants", balances.len()),
        body,
        balances,
    ))
}
