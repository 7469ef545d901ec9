pub mod check_eligibility;
pub mod claim_tokens;
pub mod compile_airdrop;
pub mod generate_fixtures;
pub mod query_claims;
pub mod verify_proof;

use chrono::{DateTime, Utc};
use tranche_protocol::{parse_address, Address};
use tranche_protocol_sdk::{AirdropData, UserData};

use crate::error::{CliError, CliResult};

/// Resolves `--now`: unix seconds, an RFC 3339 timestamp, or the wall clock.
pub fn resolve_now(now: Option<&str>) -> CliResult<i64> {
    let Some(raw) = now else {
        return Ok(Utc::now().timestamp());
    };
    if let Ok(seconds) = raw.trim().parse::<i64>() {
        return Ok(seconds);
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.timestamp())
        .map_err(|_| CliError::InvalidTimestamp(raw.to_string()))
}

pub fn format_timestamp(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| seconds.to_string())
}

/// Finds `address` in the artifact, returning its parsed address and entry.
pub fn lookup_recipient<'a>(
    airdrop_data: &'a AirdropData,
    address: &str,
) -> CliResult<(Address, &'a UserData)> {
    let claimant = parse_address(address)
        .map_err(|e| CliError::InvalidConfig(format!("address '{}': {}", address, e)))?;
    let user = airdrop_data
        .find_user(&claimant)?
        .ok_or_else(|| CliError::RecipientNotFound(address.to_string()))?;
    Ok((claimant, user))
}
