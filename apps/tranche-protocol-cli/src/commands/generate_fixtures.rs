use crate::error::{CliError, CliResult};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use std::path::PathBuf;
use tranche_protocol::Address;
use tranche_protocol_csvs::{write_recipients_csv, RecipientRow};

/// Generate a deterministic recipients CSV for local testing
pub fn execute(
    count: u64,
    seed: u64,
    recipients_csv_out: PathBuf,
    min_amount: u64,
    max_amount: u64,
) -> CliResult<()> {
    if count == 0 {
        return Err(CliError::InvalidConfig(
            "count must be greater than zero".to_string(),
        ));
    }
    if min_amount == 0 || min_amount > max_amount {
        return Err(CliError::InvalidConfig(format!(
            "invalid amount range {} - {}",
            min_amount, max_amount
        )));
    }

    println!("Generating {} recipients with seed {}", count, seed);
    println!("Amount range: {} - {} tokens", min_amount, max_amount);

    let rows = generate_rows(count, seed, min_amount, max_amount);
    write_recipients_csv(&recipients_csv_out, &rows)?;

    println!("✅ Generated recipients: {}", recipients_csv_out.display());
    Ok(())
}

fn generate_rows(count: u64, seed: u64, min_amount: u64, max_amount: u64) -> Vec<RecipientRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    while (rows.len() as u64) < count {
        let address = Address::from(rng.gen::<[u8; 20]>());
        if !seen.insert(address) {
            continue;
        }

        let whole = rng.gen_range(min_amount..=max_amount);
        // a quarter of the rows carry a two digit fractional part
        let amount = if rng.gen_ratio(1, 4) {
            format!("{}.{:02}", whole, rng.gen_range(1..100u32))
        } else {
            whole.to_string()
        };

        rows.push(RecipientRow { address, amount });
    }

    rows
}
