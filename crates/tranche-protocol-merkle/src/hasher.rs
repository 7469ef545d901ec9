use rs_merkle::Hasher;
use tranche_protocol::{hash_sorted_pair, keccak256};

/// `rs_merkle` hasher for claim trees.
///
/// Internal nodes are `keccak256(min(a, b) || max(a, b))` and a node without a
/// right sibling is carried up unchanged. This is the pairing used by
/// `merkletreejs` with `sortPairs: true` and by OpenZeppelin's `MerkleProof`, so
/// roots built here verify against those implementations.
///
/// Leaves are hashed before they reach the tree (`ClaimLeaf::to_hash`), so no
/// leaf/node prefix is applied here; the 52 byte leaf preimage can never be
/// mistaken for a 64 byte node preimage.
#[derive(Clone, Debug)]
pub struct SortedKeccakHasher;

impl Hasher for SortedKeccakHasher {
    type Hash = [u8; 32];

    fn hash(data: &[u8]) -> [u8; 32] {
        keccak256(data)
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right_hash) => hash_sorted_pair(left, right_hash),
            None => *left,
        }
    }
}
