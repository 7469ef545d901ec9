use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    #[error("Invalid address on row {row}: {message}")]
    InvalidAddress { row: usize, message: String },

    #[error("Invalid amount on row {row}: {message}")]
    InvalidAmount { row: usize, message: String },

    #[error("Duplicate recipient {address} on rows {first_row} and {row}")]
    DuplicateRecipient {
        address: String,
        first_row: usize,
        row: usize,
    },
}
