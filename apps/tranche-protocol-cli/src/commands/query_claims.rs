use crate::commands::format_timestamp;
use crate::config::RoundConfig;
use crate::error::CliResult;
use crate::round_state::open_distributor;
use std::path::PathBuf;
use tranche_protocol::{format_token_amount, ClaimStatus, TOKEN_DECIMALS, U256};
use tranche_protocol_sdk::AirdropData;

/// Summarize claim progress for every recipient in the round
pub fn execute(airdrop_data_in: PathBuf, config_path: PathBuf) -> CliResult<()> {
    let config = RoundConfig::load(&config_path)?;
    let airdrop_data = AirdropData::read_from_file(&airdrop_data_in)?;
    let distributor = open_distributor(&config, &airdrop_data)?;
    let ledger = distributor.ledger();
    let tokens = |amount| format_token_amount(amount, TOKEN_DECIMALS);

    println!("📊 Round '{}' (root {})", config.round_name, airdrop_data.root);
    println!();

    let mut total_allocated = U256::ZERO;
    let mut fully_claimed = 0usize;
    for user in &airdrop_data.users {
        let claimant = user.claimant()?;
        let allocation = user.allocation()?;
        let record = ledger.record(&claimant).unwrap_or_default();
        let status = ledger.status(&claimant, allocation);
        total_allocated = total_allocated.saturating_add(allocation);
        if status == ClaimStatus::FullyClaimed {
            fully_claimed += 1;
        }

        let last_claim = record
            .last_claim_timestamp
            .map(format_timestamp)
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{}  {:>18} / {:<18}  {:?} (claims: {}, last: {})",
            user.address,
            tokens(record.claimed_amount),
            tokens(allocation),
            status,
            record.claim_count,
            last_claim
        );
    }

    println!();
    println!("Recipients: {} ({} fully claimed)", airdrop_data.users.len(), fully_claimed);
    println!("Allocated: {} tokens", tokens(total_allocated));
    println!("Claimed: {} tokens", tokens(ledger.snapshot().total_claimed()));
    println!("Pool balance: {} tokens", tokens(distributor.token().balance()));

    Ok(())
}
