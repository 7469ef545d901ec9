use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Unregistered,     // No claim has passed proof verification yet
    PartiallyClaimed, // Some, but not all, of the allocation has been withdrawn
    FullyClaimed,     // claimed_amount == allocation; terminal
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Cumulative base units transferred to this address.
    pub claimed_amount: U256,

    /// Unix timestamp of the most recent successful claim, `None` if never.
    pub last_claim_timestamp: Option<i64>,

    /// Number of successful claims (incremented on every committed transfer).
    pub claim_count: u32,
}

impl ClaimRecord {
    /// Derives the lifecycle state of this record for the given allocation.
    pub fn status(&self, allocated_amount: U256) -> ClaimStatus {
        if self.claimed_amount >= allocated_amount && self.claim_count > 0 {
            ClaimStatus::FullyClaimed
        } else if self.claim_count > 0 {
            ClaimStatus::PartiallyClaimed
        } else {
            ClaimStatus::Unregistered
        }
    }
}

/// Point-in-time copy of every claim record, keyed by address.
///
/// Ordered so the serialized form is stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub records: BTreeMap<Address, ClaimRecord>,
}

impl LedgerSnapshot {
    pub fn total_claimed(&self) -> U256 {
        self.records
            .values()
            .fold(U256::ZERO, |acc, record| acc.saturating_add(record.claimed_amount))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ineligibility {
    InvalidProof,
    NothingToClaim,
}

/// Outcome of a read-only eligibility check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eligibility {
    pub eligible: bool,
    pub reason: Option<Ineligibility>,
    /// Amount a claim would transfer right now if requested in full.
    pub claimable: U256,
}

impl Eligibility {
    pub fn eligible(claimable: U256) -> Self {
        Self {
            eligible: true,
            reason: None,
            claimable,
        }
    }

    pub fn ineligible(reason: Ineligibility) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
            claimable: U256::ZERO,
        }
    }
}
