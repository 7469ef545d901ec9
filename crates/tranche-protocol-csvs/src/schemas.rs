/*!
# CSV Schema Definitions

Row types for the recipient list consumed by `compile-airdrop`.
*/

use serde::{Deserialize, Serialize};
use tranche_protocol::{format_address, parse_address, Address};

// ================================================================================================
// Recipients CSV Schema
// ================================================================================================

/// Expected headers for recipients.csv in exact order
pub const RECIPIENTS_CSV_HEADERS: &[&str] = &["address", "amount"];

/// Row structure for recipients.csv
///
/// **File**: `recipients.csv`
/// **Producer**: `generate-fixtures` command
/// **Consumer**: `compile-airdrop` command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipientRow {
    /// Recipient address; written back in lower-case `0x` form
    #[serde(
        deserialize_with = "deserialize_address",
        serialize_with = "serialize_address"
    )]
    pub address: Address,

    /// Human token quantity, not yet scaled to base units
    pub amount: String,
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_address(&s).map_err(serde::de::Error::custom)
}

fn serialize_address<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_address(address))
}
