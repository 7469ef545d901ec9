use crate::commands::{lookup_recipient, resolve_now};
use crate::config::RoundConfig;
use crate::error::{CliError, CliResult};
use crate::round_state::{open_distributor, save_distributor};
use std::path::PathBuf;
use tracing::info;
use tranche_protocol::{
    format_address, format_token_amount, parse_token_amount, ClaimStatus, TOKEN_DECIMALS, U256,
};
use tranche_protocol_sdk::AirdropData;

/// Claim tokens for `address` from the local pool and persist the new state.
///
/// `amount` is a decimal token quantity or `all`; anything above the currently
/// unlocked amount is capped.
pub fn execute(
    airdrop_data_in: PathBuf,
    config_path: PathBuf,
    address: String,
    amount: String,
    now: Option<String>,
) -> CliResult<()> {
    let config = RoundConfig::load(&config_path)?;
    let airdrop_data = AirdropData::read_from_file(&airdrop_data_in)?;
    let (claimant, user) = lookup_recipient(&airdrop_data, &address)?;
    let now = resolve_now(now.as_deref())?;

    let allocation = user.allocation()?;
    let proof = user.proof()?;
    let requested = parse_requested(&amount, allocation)?;

    let distributor = open_distributor(&config, &airdrop_data)?;
    let transferred = distributor.claim(&claimant, allocation, requested, &proof, now)?;
    save_distributor(&config, &distributor)?;

    let status = distributor.ledger().status(&claimant, allocation);
    info!(claimant = %format_address(&claimant), %transferred, "claim persisted");

    println!(
        "✅ Transferred {} tokens to {}",
        format_token_amount(transferred, TOKEN_DECIMALS),
        format_address(&claimant)
    );
    if transferred < requested && status != ClaimStatus::FullyClaimed {
        println!("   Request capped to the currently unlocked amount");
    }
    println!("   Status: {:?}", status);
    println!(
        "   Pool balance: {} tokens",
        format_token_amount(distributor.token().balance(), TOKEN_DECIMALS)
    );

    Ok(())
}

fn parse_requested(amount: &str, allocation: U256) -> CliResult<U256> {
    if amount.eq_ignore_ascii_case("all") {
        return Ok(allocation);
    }
    parse_token_amount(amount, TOKEN_DECIMALS)
        .map_err(|e| CliError::InvalidConfig(format!("amount '{}': {}", amount, e)))
}
