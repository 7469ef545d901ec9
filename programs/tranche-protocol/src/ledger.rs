use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use alloy_primitives::{Address, U256};
use tracing::{debug, info, warn};

use crate::claim_leaf::ClaimLeaf;
use crate::error::{ErrorCode, ProtocolResult};
use crate::proofs::ClaimProof;
use crate::state::{ClaimRecord, ClaimStatus, Eligibility, Ineligibility, LedgerSnapshot};
use crate::transfer::TokenTransfer;
use crate::vesting::VestingSchedule;

type RecordCell = Arc<Mutex<ClaimRecord>>;

/// Per-address claim accounting for one round.
///
/// The outer map lock is only held to find or insert a record; the record's own
/// mutex is held across the whole verify-compute-transfer-commit sequence, so
/// claims for the same address serialize while other addresses proceed.
#[derive(Debug)]
pub struct ClaimLedger {
    schedule: VestingSchedule,
    records: RwLock<HashMap<Address, RecordCell>>,
}

impl ClaimLedger {
    pub fn new(schedule: VestingSchedule) -> ProtocolResult<Self> {
        schedule.validate()?;
        Ok(Self {
            schedule,
            records: RwLock::new(HashMap::new()),
        })
    }

    /// Restores a ledger from persisted records.
    pub fn from_snapshot(
        schedule: VestingSchedule,
        snapshot: LedgerSnapshot,
    ) -> ProtocolResult<Self> {
        schedule.validate()?;
        let records = snapshot
            .records
            .into_iter()
            .map(|(address, record)| (address, Arc::new(Mutex::new(record))))
            .collect();
        Ok(Self {
            schedule,
            records: RwLock::new(records),
        })
    }

    /// Records of every address with at least one committed claim.
    ///
    /// Entries left behind by rejected or failed claims carry no state and are
    /// skipped here and in `record`.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        LedgerSnapshot {
            records: records
                .iter()
                .map(|(address, cell)| (*address, lock_record(cell).clone()))
                .filter(|(_, record)| record.claim_count > 0)
                .collect(),
        }
    }

    pub fn schedule(&self) -> &VestingSchedule {
        &self.schedule
    }

    pub fn record(&self, address: &Address) -> Option<ClaimRecord> {
        self.existing(address)
            .map(|cell| lock_record(&cell).clone())
            .filter(|record| record.claim_count > 0)
    }

    pub fn status(&self, address: &Address, allocated_amount: U256) -> ClaimStatus {
        self.record(address)
            .map(|record| record.status(allocated_amount))
            .unwrap_or(ClaimStatus::Unregistered)
    }

    /// Cumulative amount of `allocated_amount` released by the schedule at `now`.
    pub fn unlocked(&self, allocated_amount: U256, now: i64) -> U256 {
        self.schedule.unlocked(allocated_amount, now)
    }

    /// Unlocked minus already claimed, clamped at zero. Never mutates state.
    pub fn claimable_now(&self, address: &Address, allocated_amount: U256, now: i64) -> U256 {
        let claimed = self
            .record(address)
            .map(|record| record.claimed_amount)
            .unwrap_or(U256::ZERO);
        self.available(allocated_amount, claimed, now)
    }

    pub fn can_claim(
        &self,
        address: &Address,
        allocated_amount: U256,
        proof: &ClaimProof,
        root: &[u8; 32],
        now: i64,
    ) -> Eligibility {
        let leaf = ClaimLeaf::new(*address, allocated_amount);
        if !proof.verify(root, &leaf) {
            return Eligibility::ineligible(Ineligibility::InvalidProof);
        }

        let claimable = self.claimable_now(address, allocated_amount, now);
        if claimable.is_zero() {
            return Eligibility::ineligible(Ineligibility::NothingToClaim);
        }
        Eligibility::eligible(claimable)
    }

    /// Verifies, caps and executes a claim, returning the amount transferred.
    ///
    /// `requested` above the currently claimable amount is capped rather than
    /// rejected. The record is only advanced after `transfer` succeeds; a
    /// transfer failure leaves it exactly as it was.
    #[allow(clippy::too_many_arguments)]
    pub fn claim(
        &self,
        address: &Address,
        allocated_amount: U256,
        proof: &ClaimProof,
        root: &[u8; 32],
        requested: U256,
        now: i64,
        transfer: &dyn TokenTransfer,
    ) -> ProtocolResult<U256> {
        let leaf = ClaimLeaf::new(*address, allocated_amount);
        if !proof.verify(root, &leaf) {
            warn!(claimant = %address, "rejected claim: invalid merkle proof");
            return Err(ErrorCode::InvalidProof);
        }
        if requested.is_zero() {
            warn!(claimant = %address, "rejected claim: zero amount requested");
            return Err(ErrorCode::NothingToClaim);
        }

        let cell = self.entry(address);
        let mut record = lock_record(&cell);

        let available = self.available(allocated_amount, record.claimed_amount, now);
        debug!(
            claimant = %address,
            allocated = %allocated_amount,
            claimed = %record.claimed_amount,
            available = %available,
            requested = %requested,
            "computed claimable amount"
        );
        if available.is_zero() {
            warn!(claimant = %address, "rejected claim: nothing unlocked to claim");
            return Err(ErrorCode::NothingToClaim);
        }

        let transferred = requested.min(available);
        let claimed_amount = record
            .claimed_amount
            .checked_add(transferred)
            .ok_or(ErrorCode::NumericOverflow)?;
        let claim_count = record
            .claim_count
            .checked_add(1)
            .ok_or(ErrorCode::NumericOverflow)?;

        if let Err(e) = transfer.transfer(address, transferred) {
            warn!(claimant = %address, amount = %transferred, error = %e, "token transfer failed");
            return Err(e.into());
        }

        record.claimed_amount = claimed_amount;
        record.last_claim_timestamp = Some(now);
        record.claim_count = claim_count;

        info!(
            claimant = %address,
            amount = %transferred,
            total_claimed = %claimed_amount,
            status = ?record.status(allocated_amount),
            "claim executed"
        );
        Ok(transferred)
    }

    fn available(&self, allocated_amount: U256, claimed: U256, now: i64) -> U256 {
        self.schedule
            .unlocked(allocated_amount, now)
            .saturating_sub(claimed)
    }

    fn existing(&self, address: &Address) -> Option<RecordCell> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned()
    }

    fn entry(&self, address: &Address) -> RecordCell {
        if let Some(cell) = self.existing(address) {
            return cell;
        }
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.entry(*address).or_default().clone()
    }
}

fn lock_record(cell: &RecordCell) -> std::sync::MutexGuard<'_, ClaimRecord> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}
