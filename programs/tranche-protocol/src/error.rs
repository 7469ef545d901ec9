use thiserror::Error;

use crate::transfer::TransferError;

pub type ProtocolResult<T> = Result<T, ErrorCode>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidAddressLength(usize),
    #[error("Amount does not fit in 256 bits: {0}")]
    AmountOverflow(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid hash encoding: {0}")]
    InvalidHash(String),

    #[error("Invalid Merkle proof provided.")]
    InvalidProof,
    #[error("Nothing to claim for this address at this time.")]
    NothingToClaim,
    #[error("Token transfer failed: {0}")]
    TransferFailure(#[from] TransferError),

    #[error("No merkle root has been published for this round.")]
    RootNotSet,
    #[error("A different merkle root has already been published for this round.")]
    RootAlreadySet,
    #[error("Unauthorized access or mismatched authority.")]
    Unauthorized,
    #[error("Invalid vesting schedule: {0}")]
    InvalidVestingSchedule(String),
    #[error("A calculation resulted in a numeric overflow.")]
    NumericOverflow,
}
