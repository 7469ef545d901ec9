use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] tranche_protocol_csvs::CsvError),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Airdrop compilation failed: {0}")]
    Compiler(#[from] tranche_protocol_sdk::CompilerError),

    #[error("Claim rejected: {0}")]
    Protocol(#[from] tranche_protocol::ErrorCode),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid timestamp '{0}': expected unix seconds or RFC 3339")]
    InvalidTimestamp(String),

    #[error("Address {0} is not a recipient of this airdrop")]
    RecipientNotFound(String),
}
