use rs_merkle::Hasher;
use tracing::debug;
use tranche_protocol::ClaimProof;

use crate::error::{MerkleError, MerkleResult};
use crate::hasher::SortedKeccakHasher;

/// Binary claim tree kept as an explicit list of levels.
///
/// `levels[0]` holds the leaf hashes in input order and the last level holds
/// only the root. Every level is retained so a proof costs O(depth).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimTree {
    levels: Vec<Vec<[u8; 32]>>,
}

impl ClaimTree {
    pub fn build(leaf_hashes: Vec<[u8; 32]>) -> MerkleResult<Self> {
        if leaf_hashes.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut levels = vec![leaf_hashes];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<[u8; 32]> = current
                .chunks(2)
                .map(|pair| SortedKeccakHasher::concat_and_hash(&pair[0], pair.get(1)))
                .collect();
            levels.push(next);
        }

        debug!(
            leaves = levels[0].len(),
            depth = levels.len() - 1,
            "built claim tree"
        );
        Ok(Self { levels })
    }

    pub fn root(&self) -> [u8; 32] {
        // build() guarantees a final level with exactly one node
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of hashing levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    pub fn levels(&self) -> &[Vec<[u8; 32]>] {
        &self.levels
    }

    pub fn leaf_hash(&self, leaf_index: usize) -> Option<[u8; 32]> {
        self.levels[0].get(leaf_index).copied()
    }

    /// Sibling path for `leaf_index`, skipping levels where the node was promoted.
    pub fn generate_proof(&self, leaf_index: usize) -> MerkleResult<ClaimProof> {
        if leaf_index >= self.leaf_count() {
            return Err(MerkleError::InvalidLeafIndex {
                index: leaf_index,
                leaf_count: self.leaf_count(),
            });
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut index = leaf_index;
        for level in &self.levels[..self.depth()] {
            if let Some(sibling) = level.get(index ^ 1) {
                proof.push(*sibling);
            }
            index /= 2;
        }

        Ok(ClaimProof::new(proof))
    }
}
