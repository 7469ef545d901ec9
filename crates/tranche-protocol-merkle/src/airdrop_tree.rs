use std::collections::HashMap;

use tracing::info;
use tranche_protocol::{format_hash, Address, ClaimLeaf, ClaimProof, U256};

use crate::claim_tree::ClaimTree;
use crate::error::{MerkleError, MerkleResult};

/// Creates the claim tree for one airdrop round.
///
/// Leaves keep the order of `allocations`, so the same recipient list always
/// yields the same root. A claimant listed twice is an error rather than a
/// merged allocation: each address must map to exactly one leaf.
pub fn create_airdrop_tree(allocations: &[(Address, U256)]) -> MerkleResult<AirdropTree> {
    let leaves = allocations
        .iter()
        .map(|(claimant, amount)| ClaimLeaf::new(*claimant, *amount))
        .collect();
    AirdropTree::from_leaves(leaves)
}

/// Claim tree together with the leaves it commits to.
#[derive(Clone, Debug)]
pub struct AirdropTree {
    /// The original leaves, in tree order
    pub leaves: Vec<ClaimLeaf>,
    /// Mapping from claimant address to their leaf index in the tree
    pub claimant_leaf_index: HashMap<Address, usize>,
    tree: ClaimTree,
}

impl AirdropTree {
    pub fn from_leaves(leaves: Vec<ClaimLeaf>) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut claimant_leaf_index = HashMap::with_capacity(leaves.len());
        for (index, leaf) in leaves.iter().enumerate() {
            if claimant_leaf_index.insert(leaf.claimant, index).is_some() {
                return Err(MerkleError::DuplicateClaimant(leaf.claimant));
            }
        }

        let tree = ClaimTree::build(leaves.iter().map(ClaimLeaf::to_hash).collect())?;
        info!(
            leaves = leaves.len(),
            depth = tree.depth(),
            root = %format_hash(&tree.root()),
            "built airdrop tree"
        );

        Ok(Self {
            leaves,
            claimant_leaf_index,
            tree,
        })
    }

    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn tree(&self) -> &ClaimTree {
        &self.tree
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn proof_for_claimant(&self, claimant: &Address) -> MerkleResult<ClaimProof> {
        self.tree.generate_proof(self.index_of(claimant)?)
    }

    pub fn proofs_for_claimants(
        &self,
        claimants: &[Address],
    ) -> MerkleResult<HashMap<Address, ClaimProof>> {
        claimants
            .iter()
            .map(|claimant| Ok((*claimant, self.proof_for_claimant(claimant)?)))
            .collect()
    }

    pub fn leaf_for_claimant(&self, claimant: &Address) -> MerkleResult<&ClaimLeaf> {
        let index = self.index_of(claimant)?;
        self.leaves
            .get(index)
            .ok_or(MerkleError::InvalidLeafIndex {
                index,
                leaf_count: self.leaves.len(),
            })
    }

    /// Checks `proof` for `claimant`'s committed leaf against this tree's root.
    pub fn verify_proof(&self, claimant: &Address, proof: &ClaimProof) -> MerkleResult<bool> {
        let leaf = self.leaf_for_claimant(claimant)?;
        Ok(proof.verify(&self.root(), leaf))
    }

    fn index_of(&self, claimant: &Address) -> MerkleResult<usize> {
        self.claimant_leaf_index
            .get(claimant)
            .copied()
            .ok_or(MerkleError::ClaimantNotFound(*claimant))
    }
}
