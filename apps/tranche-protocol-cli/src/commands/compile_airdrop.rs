use crate::error::CliResult;
use std::path::PathBuf;
use tranche_protocol::{format_hash, format_token_amount, TOKEN_DECIMALS};
use tranche_protocol_sdk::compile_airdrop;

/// Compile a recipients CSV into the published airdrop artifact
pub fn execute(recipients_csv_in: PathBuf, airdrop_data_out: PathBuf) -> CliResult<()> {
    println!("📋 Compiling airdrop from {}", recipients_csv_in.display());

    let compiled = compile_airdrop(&recipients_csv_in)?;
    compiled.to_airdrop_data().write_to_file(&airdrop_data_out)?;

    println!("✅ Airdrop compiled: {}", airdrop_data_out.display());
    println!("   Recipients: {}", compiled.recipient_count());
    println!(
        "   Total allocation: {} tokens",
        format_token_amount(compiled.total_allocation, TOKEN_DECIMALS)
    );
    println!("   Tree depth: {}", compiled.tree.depth());
    println!("   Merkle root: {}", format_hash(&compiled.root()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tranche_protocol::Address;
    use tranche_protocol_csvs::{write_recipients_csv, RecipientRow};
    use tranche_protocol_sdk::AirdropData;

    #[test]
    fn test_compile_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("recipients.csv");
        let json_path = dir.path().join("airdrop.json");
        let rows: Vec<RecipientRow> = (1..=3u8)
            .map(|i| RecipientRow {
                address: Address::with_last_byte(i),
                amount: format!("{}", u32::from(i) * 100),
            })
            .collect();
        write_recipients_csv(&csv_path, &rows).unwrap();

        execute(csv_path, json_path.clone()).unwrap();

        let data = AirdropData::read_from_file(&json_path).unwrap();
        assert_eq!(
            data.root,
            "0x667d3156de334767fdf3e6d42e4ec8eb917f180fe9841342fb1c3c127748c597"
        );
        assert_eq!(data.users.len(), 3);
        assert_eq!(data.users[2].value, "300000000000000000000");
    }
}
