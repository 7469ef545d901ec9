use sha3::{Digest, Keccak256};

use crate::constants::HASH_LENGTH;
use crate::error::{ErrorCode, ProtocolResult};

/// Keccak-256 as used by Ethereum-style chains (not NIST SHA3-256).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hashes two sibling nodes into their parent.
///
/// The pair is ordered lexicographically before concatenation, so the parent
/// does not depend on which side each child sat on. Verifiers that carry no
/// position bits rely on this: `keccak256(min(a, b) || max(a, b))`.
pub fn hash_sorted_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    Keccak256::new()
        .chain_update(left)
        .chain_update(right)
        .finalize()
        .into()
}

/// Parses a `0x`-prefixed (or bare) 64 character hex string into a node hash.
pub fn parse_hash(input: &str) -> ProtocolResult<[u8; 32]> {
    let trimmed = input.trim();
    let cleaned = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes =
        hex::decode(cleaned).map_err(|e| ErrorCode::InvalidHash(format!("{}: {}", input, e)))?;
    if bytes.len() != HASH_LENGTH {
        return Err(ErrorCode::InvalidHash(format!(
            "{}: expected {} bytes, got {}",
            input,
            HASH_LENGTH,
            bytes.len()
        )));
    }
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// Formats a node hash as lower-case `0x` hex.
pub fn format_hash(hash: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(hash))
}
