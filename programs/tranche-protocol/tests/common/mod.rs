#![allow(dead_code)]

use tranche_protocol::{
    hash_sorted_pair, parse_address, AirdropDistributor, Address, ClaimLeaf, ClaimProof,
    TokenPool, VestingSchedule, U256,
};

pub const ALICE: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";
pub const BOB: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const CAROL: &str = "0x90F79bf6EB2c4f870365E785982E1f101E93b906";
pub const ADMIN: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

pub fn address(hex: &str) -> Address {
    parse_address(hex).expect("fixture address")
}

/// Three recipients committed under one root, with hand-built proofs.
///
/// Level 1 is `[h(alice, bob), carol]`; carol is promoted, so her proof has a
/// single element while alice and bob carry two.
pub struct RoundFixture {
    pub leaves: Vec<ClaimLeaf>,
    pub proofs: Vec<ClaimProof>,
    pub root: [u8; 32],
}

impl RoundFixture {
    pub fn new() -> Self {
        let leaves = vec![
            ClaimLeaf::new(address(ALICE), tokens(1000)),
            ClaimLeaf::new(address(BOB), tokens(1000)),
            ClaimLeaf::new(address(CAROL), tokens(500)),
        ];
        let hashes: Vec<[u8; 32]> = leaves.iter().map(ClaimLeaf::to_hash).collect();
        let ab = hash_sorted_pair(&hashes[0], &hashes[1]);
        let root = hash_sorted_pair(&ab, &hashes[2]);

        let proofs = vec![
            ClaimProof::new(vec![hashes[1], hashes[2]]),
            ClaimProof::new(vec![hashes[0], hashes[2]]),
            ClaimProof::new(vec![ab]),
        ];

        Self {
            leaves,
            proofs,
            root,
        }
    }

    pub fn alice(&self) -> (&ClaimLeaf, &ClaimProof) {
        (&self.leaves[0], &self.proofs[0])
    }

    pub fn bob(&self) -> (&ClaimLeaf, &ClaimProof) {
        (&self.leaves[1], &self.proofs[1])
    }

    pub fn carol(&self) -> (&ClaimLeaf, &ClaimProof) {
        (&self.leaves[2], &self.proofs[2])
    }

    pub fn total_allocation(&self) -> U256 {
        self.leaves
            .iter()
            .fold(U256::ZERO, |acc, leaf| acc + leaf.amount)
    }

    /// Distributor with the root published and a pool funded for every allocation.
    pub fn distributor(&self, schedule: VestingSchedule) -> AirdropDistributor<TokenPool> {
        self.distributor_with_pool(schedule, self.total_allocation())
    }

    pub fn distributor_with_pool(
        &self,
        schedule: VestingSchedule,
        pool_balance: U256,
    ) -> AirdropDistributor<TokenPool> {
        let admin = address(ADMIN);
        let distributor =
            AirdropDistributor::new(admin, schedule, TokenPool::new(pool_balance))
                .expect("valid schedule");
        distributor
            .set_root(&admin, self.root)
            .expect("admin publishes root");
        distributor
    }
}

/// Linear schedule starting at t=0 with no cliff or initial unlock.
pub fn linear_from_zero(duration_seconds: u64) -> VestingSchedule {
    VestingSchedule::Linear {
        start: 0,
        cliff_seconds: 0,
        duration_seconds,
        initial_unlock_bps: 0,
    }
}
