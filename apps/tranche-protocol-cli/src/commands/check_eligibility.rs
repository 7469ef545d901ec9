use crate::commands::{format_timestamp, lookup_recipient, resolve_now};
use crate::config::RoundConfig;
use crate::error::CliResult;
use crate::round_state::open_distributor;
use std::path::PathBuf;
use tranche_protocol::{format_address, format_token_amount, Ineligibility, TOKEN_DECIMALS};
use tranche_protocol_sdk::AirdropData;

/// Report what `address` could claim right now without changing any state
pub fn execute(
    airdrop_data_in: PathBuf,
    config_path: PathBuf,
    address: String,
    now: Option<String>,
) -> CliResult<()> {
    let config = RoundConfig::load(&config_path)?;
    let airdrop_data = AirdropData::read_from_file(&airdrop_data_in)?;
    let (claimant, user) = lookup_recipient(&airdrop_data, &address)?;
    let now = resolve_now(now.as_deref())?;

    let distributor = open_distributor(&config, &airdrop_data)?;
    let allocation = user.allocation()?;
    let proof = user.proof()?;

    let eligibility = distributor.can_claim(&claimant, allocation, &proof, now)?;
    let ledger = distributor.ledger();
    let record = ledger.record(&claimant).unwrap_or_default();
    let tokens = |amount| format_token_amount(amount, TOKEN_DECIMALS);

    println!("🔍 Eligibility for {} in round '{}'", format_address(&claimant), config.round_name);
    println!("   As of: {}", format_timestamp(now));
    println!("   Allocation: {} tokens", tokens(allocation));
    println!("   Unlocked: {} tokens", tokens(ledger.unlocked(allocation, now)));
    println!("   Claimed: {} tokens", tokens(record.claimed_amount));
    println!("   Status: {:?}", ledger.status(&claimant, allocation));

    match eligibility.reason {
        None => println!("✅ Claimable now: {} tokens", tokens(eligibility.claimable)),
        Some(Ineligibility::InvalidProof) => println!("❌ Published proof does not verify"),
        Some(Ineligibility::NothingToClaim) => {
            println!("⏳ Nothing to claim right now");
            if let Some(end) = ledger.schedule().fully_vested_at() {
                println!("   Fully vested at: {}", format_timestamp(end));
            }
        }
    }

    Ok(())
}
