use crate::commands::lookup_recipient;
use crate::error::CliResult;
use std::path::PathBuf;
use tranche_protocol::{format_address, format_token_amount, ClaimLeaf, TOKEN_DECIMALS};
use tranche_protocol_sdk::AirdropData;

/// Check a recipient's published proof against the artifact root (off-chain).
///
/// Returns whether the proof verified so callers can set an exit status.
pub fn execute(airdrop_data_in: PathBuf, address: String) -> CliResult<bool> {
    let airdrop_data = AirdropData::read_from_file(&airdrop_data_in)?;
    let (claimant, user) = lookup_recipient(&airdrop_data, &address)?;

    let allocation = user.allocation()?;
    let proof = user.proof()?;
    let root = airdrop_data.root_bytes()?;
    let valid = proof.verify(&root, &ClaimLeaf::new(claimant, allocation));

    println!("🔍 Recipient: {}", format_address(&claimant));
    println!(
        "   Allocation: {} tokens",
        format_token_amount(allocation, TOKEN_DECIMALS)
    );
    println!("   Proof length: {}", proof.len());
    if valid {
        println!("✅ Proof verifies against root {}", airdrop_data.root);
    } else {
        println!("❌ Proof does NOT verify against root {}", airdrop_data.root);
    }

    Ok(valid)
}
