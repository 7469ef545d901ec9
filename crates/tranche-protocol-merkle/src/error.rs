use thiserror::Error;
use tranche_protocol::{format_address, Address};

pub type MerkleResult<T> = Result<T, MerkleError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Cannot build a claim tree without leaves")]
    EmptyTree,
    #[error("Duplicate claimant found: {}", format_address(.0))]
    DuplicateClaimant(Address),
    #[error("Claimant not found in tree: {}", format_address(.0))]
    ClaimantNotFound(Address),
    #[error("Invalid leaf index {index} for tree with {leaf_count} leaves")]
    InvalidLeafIndex { index: usize, leaf_count: usize },
}
