use std::sync::{PoisonError, RwLock};

use alloy_primitives::{Address, U256};
use tracing::{info, warn};

use crate::error::{ErrorCode, ProtocolResult};
use crate::hashing::format_hash;
use crate::ledger::ClaimLedger;
use crate::proofs::ClaimProof;
use crate::state::{Eligibility, LedgerSnapshot};
use crate::transfer::TokenTransfer;
use crate::vesting::VestingSchedule;

/// Settlement-side facade for a single airdrop round.
///
/// Holds the published root, the claim ledger and the token source. The root
/// is the only commitment it stores; allocations and proofs arrive with each
/// call.
#[derive(Debug)]
pub struct AirdropDistributor<T: TokenTransfer> {
    admin: Address,
    merkle_root: RwLock<Option<[u8; 32]>>,
    ledger: ClaimLedger,
    token: T,
}

impl<T: TokenTransfer> AirdropDistributor<T> {
    pub fn new(admin: Address, schedule: VestingSchedule, token: T) -> ProtocolResult<Self> {
        Ok(Self::with_ledger(admin, ClaimLedger::new(schedule)?, token))
    }

    /// Rebuilds a distributor from persisted state.
    pub fn restore(
        admin: Address,
        schedule: VestingSchedule,
        merkle_root: Option<[u8; 32]>,
        snapshot: LedgerSnapshot,
        token: T,
    ) -> ProtocolResult<Self> {
        let distributor =
            Self::with_ledger(admin, ClaimLedger::from_snapshot(schedule, snapshot)?, token);
        if let Some(root) = merkle_root {
            distributor.set_root(&admin, root)?;
        }
        Ok(distributor)
    }

    fn with_ledger(admin: Address, ledger: ClaimLedger, token: T) -> Self {
        Self {
            admin,
            merkle_root: RwLock::new(None),
            ledger,
            token,
        }
    }

    /// Publishes the round's root.
    ///
    /// Only the admin may call this. Re-publishing the same root is a no-op;
    /// a different root after publication is refused because the recipient
    /// set is fixed for the round.
    pub fn set_root(&self, caller: &Address, root: [u8; 32]) -> ProtocolResult<()> {
        if *caller != self.admin {
            warn!(caller = %caller, "rejected root publication from non-admin");
            return Err(ErrorCode::Unauthorized);
        }

        let mut current = self
            .merkle_root
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match *current {
            Some(existing) if existing == root => Ok(()),
            Some(_) => Err(ErrorCode::RootAlreadySet),
            None => {
                *current = Some(root);
                info!(root = %format_hash(&root), "merkle root published");
                Ok(())
            }
        }
    }

    pub fn merkle_root(&self) -> Option<[u8; 32]> {
        *self
            .merkle_root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn admin(&self) -> &Address {
        &self.admin
    }

    pub fn claim(
        &self,
        claimant: &Address,
        allocated_amount: U256,
        requested: U256,
        proof: &ClaimProof,
        now: i64,
    ) -> ProtocolResult<U256> {
        let root = self.merkle_root().ok_or(ErrorCode::RootNotSet)?;
        self.ledger.claim(
            claimant,
            allocated_amount,
            proof,
            &root,
            requested,
            now,
            &self.token,
        )
    }

    /// Read-only claimable amount; does not check a proof.
    pub fn calculate_claimable(&self, claimant: &Address, allocated_amount: U256, now: i64) -> U256 {
        self.ledger.claimable_now(claimant, allocated_amount, now)
    }

    pub fn can_claim(
        &self,
        claimant: &Address,
        allocated_amount: U256,
        proof: &ClaimProof,
        now: i64,
    ) -> ProtocolResult<Eligibility> {
        let root = self.merkle_root().ok_or(ErrorCode::RootNotSet)?;
        Ok(self
            .ledger
            .can_claim(claimant, allocated_amount, proof, &root, now))
    }

    pub fn ledger(&self) -> &ClaimLedger {
        &self.ledger
    }

    pub fn token(&self) -> &T {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TokenPool;

    fn distributor() -> AirdropDistributor<TokenPool> {
        AirdropDistributor::new(
            Address::repeat_byte(0xad),
            VestingSchedule::Immediate,
            TokenPool::new(U256::from(1000u64)),
        )
        .unwrap()
    }

    #[test]
    fn test_set_root_requires_admin() {
        let d = distributor();
        assert_eq!(
            d.set_root(&Address::repeat_byte(0x01), [1u8; 32]),
            Err(ErrorCode::Unauthorized)
        );
        assert_eq!(d.merkle_root(), None);
    }

    #[test]
    fn test_set_root_is_idempotent_per_round() {
        let d = distributor();
        let admin = *d.admin();

        d.set_root(&admin, [1u8; 32]).unwrap();
        d.set_root(&admin, [1u8; 32]).unwrap();
        assert_eq!(d.set_root(&admin, [2u8; 32]), Err(ErrorCode::RootAlreadySet));
        assert_eq!(d.merkle_root(), Some([1u8; 32]));
    }

    #[test]
    fn test_claims_require_published_root() {
        let d = distributor();
        let claimant = Address::repeat_byte(0x01);
        let proof = ClaimProof::default();

        assert_eq!(
            d.claim(&claimant, U256::from(1u64), U256::from(1u64), &proof, 0),
            Err(ErrorCode::RootNotSet)
        );
        assert_eq!(
            d.can_claim(&claimant, U256::from(1u64), &proof, 0),
            Err(ErrorCode::RootNotSet)
        );
    }
}
