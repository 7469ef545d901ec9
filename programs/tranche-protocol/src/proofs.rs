use crate::claim_leaf::ClaimLeaf;
use crate::error::ProtocolResult;
use crate::hashing::{format_hash, hash_sorted_pair, parse_hash};

/// Inclusion proof for one leaf of a binary claim tree.
///
/// Holds the sibling hashes from the leaf level up to, but not including, the
/// root. Levels where the node was promoted without a sibling contribute no
/// entry. No left/right flags are carried: every step hashes the sorted pair,
/// so position is irrelevant to the verifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimProof(pub Vec<[u8; 32]>);

impl ClaimProof {
    pub fn new(proof: Vec<[u8; 32]>) -> Self {
        Self(proof)
    }

    pub fn as_slice(&self) -> &[[u8; 32]] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<[u8; 32]> {
        self.0
    }

    /// Replays the proof from `leaf_hash` and returns the root it implies.
    pub fn compute_root(&self, leaf_hash: &[u8; 32]) -> [u8; 32] {
        self.0
            .iter()
            .fold(*leaf_hash, |current, sibling| hash_sorted_pair(&current, sibling))
    }

    /// Verify the proof for `leaf` against a published root.
    ///
    /// Returns `false` for a wrong address, a wrong amount, a tampered proof or
    /// a proof from a different tree. This is a predicate, not an error path.
    pub fn verify(&self, root: &[u8; 32], leaf: &ClaimLeaf) -> bool {
        verify_proof(&self.0, root, &leaf.to_hash())
    }

    /// Proof elements as `0x` hex strings, the form distributed to recipients.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.0.iter().map(format_hash).collect()
    }

    pub fn from_hex_strings<S: AsRef<str>>(elements: &[S]) -> ProtocolResult<Self> {
        let proof = elements
            .iter()
            .map(|element| parse_hash(element.as_ref()))
            .collect::<ProtocolResult<Vec<_>>>()?;
        Ok(Self(proof))
    }
}

impl From<Vec<[u8; 32]>> for ClaimProof {
    fn from(proof: Vec<[u8; 32]>) -> Self {
        Self::new(proof)
    }
}

/// Standalone sorted-pair proof verification.
///
/// Uses only the hash primitive and byte comparison, so the same routine can
/// run wherever the root is enforced.
pub fn verify_proof(proof: &[[u8; 32]], root: &[u8; 32], leaf_hash: &[u8; 32]) -> bool {
    let mut computed_hash = *leaf_hash;
    for sibling in proof {
        computed_hash = hash_sorted_pair(&computed_hash, sibling);
    }
    computed_hash == *root
}
