mod compiler_error;

use {
    crate::airdrop_data::{AirdropData, UserData},
    std::path::Path,
    tracing::info,
    tranche_protocol::{format_address, format_hash, Address, ClaimProof, U256},
    tranche_protocol_csvs::{read_recipients_csv, validate_recipients},
    tranche_protocol_merkle::{create_airdrop_tree, AirdropTree},
};

pub use compiler_error::{CompilerError, CompilerResult};

/// A built airdrop: the tree, one verified proof per leaf, and the round total.
#[derive(Clone, Debug)]
pub struct CompiledAirdrop {
    pub tree: AirdropTree,
    pub proofs: Vec<ClaimProof>,
    pub total_allocation: U256,
}

impl CompiledAirdrop {
    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn recipient_count(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Distributable artifact with one entry per recipient, in leaf order.
    pub fn to_airdrop_data(&self) -> AirdropData {
        let users = self
            .tree
            .leaves
            .iter()
            .zip(&self.proofs)
            .map(|(leaf, proof)| UserData {
                address: format_address(&leaf.claimant),
                proof: proof.to_hex_strings(),
                value: leaf.amount.to_string(),
            })
            .collect();

        AirdropData {
            root: format_hash(&self.root()),
            users,
        }
    }
}

/// Reads, validates and compiles a recipients CSV in one pass.
pub fn compile_airdrop<P: AsRef<Path>>(recipients_csv: P) -> CompilerResult<CompiledAirdrop> {
    let rows = read_recipients_csv(recipients_csv)?;
    let allocations = validate_recipients(&rows)?; // fail fast on duplicates or bad amounts
    compile_recipients(&allocations)
}

/// Builds the claim tree for already-scaled allocations.
///
/// Every generated proof is replayed against the root before returning, so a
/// compiled airdrop never ships a proof that cannot be claimed with.
pub fn compile_recipients(allocations: &[(Address, U256)]) -> CompilerResult<CompiledAirdrop> {
    let total_allocation = allocations
        .iter()
        .try_fold(U256::ZERO, |acc, (_, amount)| acc.checked_add(*amount))
        .ok_or(CompilerError::AllocationOverflow)?;

    let tree = create_airdrop_tree(allocations)?;
    let root = tree.root();

    let mut proofs = Vec::with_capacity(tree.leaf_count());
    for (index, leaf) in tree.leaves.iter().enumerate() {
        let proof = tree.tree().generate_proof(index)?;
        if !proof.verify(&root, leaf) {
            return Err(CompilerError::ProofSelfCheckFailed {
                address: format_address(&leaf.claimant),
            });
        }
        proofs.push(proof);
    }

    info!(
        recipients = tree.leaf_count(),
        total_allocation = %total_allocation,
        root = %format_hash(&root),
        "compiled airdrop"
    );

    Ok(CompiledAirdrop {
        tree,
        proofs,
        total_allocation,
    })
}
