use alloy_primitives::{Address, U256};

use crate::constants::{ADDRESS_LENGTH, LEAF_ENCODING_LENGTH};
use crate::error::{ErrorCode, ProtocolResult};
use crate::hashing::keccak256;

/// Represents the data that is hashed to form a leaf in the claim tree.
/// Each leaf commits to exactly one recipient's allocation for the round.
///
/// ## Encoding (must never change once a root is published)
///
/// ```text
/// claimant: 20 bytes, offset 0   (raw address bytes)
/// amount:   32 bytes, offset 20  (uint256, big-endian)
/// ```
///
/// This is Solidity's `abi.encodePacked(address, uint256)`, so a leaf built
/// here matches `keccak256(abi.encodePacked(account, amount))` computed by an
/// on-chain verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClaimLeaf {
    /// The recipient of the allocation.
    pub claimant: Address,
    /// The allocation, already scaled to token base units.
    pub amount: U256,
}

impl ClaimLeaf {
    pub fn new(claimant: Address, amount: U256) -> Self {
        Self { claimant, amount }
    }

    /// Packs the leaf into its fixed-width 52 byte preimage.
    pub fn encode(&self) -> [u8; LEAF_ENCODING_LENGTH] {
        let mut encoded = [0u8; LEAF_ENCODING_LENGTH];
        encoded[..ADDRESS_LENGTH].copy_from_slice(self.claimant.as_slice());
        encoded[ADDRESS_LENGTH..].copy_from_slice(&self.amount.to_be_bytes::<32>());
        encoded
    }

    /// Hash this leaf to produce the 32-byte node stored at level 0 of the tree.
    pub fn to_hash(&self) -> [u8; 32] {
        keccak256(&self.encode())
    }
}

/// Encodes and hashes a textual `(address, amount)` pair in one step.
///
/// `amount` is the scaled integer in base units (e.g. `"1000000000000000000000"`
/// for 1000 tokens), not a human decimal quantity.
pub fn encode_leaf(address: &str, amount: &str) -> ProtocolResult<[u8; 32]> {
    let claimant = parse_address(address)?;
    let amount = parse_amount(amount)?;
    Ok(ClaimLeaf::new(claimant, amount).to_hash())
}

/// Parses a hex address with or without the `0x` prefix.
///
/// Mixed case input is accepted; checksums are not enforced.
pub fn parse_address(input: &str) -> ProtocolResult<Address> {
    let trimmed = input.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(cleaned)
        .map_err(|e| ErrorCode::InvalidAddress(format!("{}: {}", input, e)))?;
    if bytes.len() != ADDRESS_LENGTH {
        return Err(ErrorCode::InvalidAddressLength(bytes.len()));
    }

    Ok(Address::from_slice(&bytes))
}

/// Canonical lower-case `0x` form of an address.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// Parses an unsigned decimal integer that must fit in 256 bits.
pub fn parse_amount(input: &str) -> ProtocolResult<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErrorCode::InvalidAmount(input.to_string()));
    }

    U256::from_str_radix(trimmed, 10).map_err(|_| ErrorCode::AmountOverflow(input.to_string()))
}
