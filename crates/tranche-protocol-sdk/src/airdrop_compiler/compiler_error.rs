#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error(transparent)]
    Csv(#[from] tranche_protocol_csvs::CsvError),

    #[error(transparent)]
    Merkle(#[from] tranche_protocol_merkle::MerkleError),

    #[error(transparent)]
    Protocol(#[from] tranche_protocol::ErrorCode),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Total allocation does not fit in 256 bits")]
    AllocationOverflow,

    #[error("Generated proof for {address} does not verify against the root")]
    ProofSelfCheckFailed { address: String },
}

pub type CompilerResult<T> = std::result::Result<T, CompilerError>;
