pub mod amount;
pub mod claim_leaf;
pub mod constants;
pub mod distributor;
pub mod error;
pub mod hashing;
pub mod ledger;
pub mod proofs;
pub mod state;
pub mod transfer;
pub mod vesting;

pub use alloy_primitives::{Address, U256};

pub use amount::{format_token_amount, parse_token_amount};
pub use claim_leaf::{encode_leaf, format_address, parse_address, parse_amount, ClaimLeaf};
pub use constants::{BPS_DENOMINATOR, TOKEN_DECIMALS};
pub use distributor::AirdropDistributor;
pub use error::{ErrorCode, ProtocolResult};
pub use hashing::{format_hash, hash_sorted_pair, keccak256, parse_hash};
pub use ledger::ClaimLedger;
pub use proofs::{verify_proof, ClaimProof};
pub use state::*;
pub use transfer::{PoolState, TokenPool, TokenTransfer, TransferError};
pub use vesting::VestingSchedule;
