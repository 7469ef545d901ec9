pub mod airdrop_tree;
pub mod claim_tree;
pub mod error;
pub mod hasher;

pub use airdrop_tree::{create_airdrop_tree, AirdropTree};
pub use claim_tree::ClaimTree;
pub use error::{MerkleError, MerkleResult};
pub use hasher::SortedKeccakHasher;

// Re-export leaf and proof types from the claim engine
pub use tranche_protocol::{verify_proof, ClaimLeaf, ClaimProof};

// Re-export key types from rs-merkle for convenience
pub use rs_merkle::{MerkleProof, MerkleTree};
