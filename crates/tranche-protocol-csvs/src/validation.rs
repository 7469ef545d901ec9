/*!
# CSV Validation & I/O

Reading, writing and semantic validation of recipient lists.
*/

use crate::{
    errors::{CsvError, CsvResult},
    schemas::{RecipientRow, RECIPIENTS_CSV_HEADERS},
};
use csv::{Reader, Writer};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tranche_protocol::{format_address, parse_token_amount, Address, TOKEN_DECIMALS, U256};

// ================================================================================================
// CSV Reading with Validation
// ================================================================================================

/// Read and validate a recipients CSV file
pub fn read_recipients_csv<P: AsRef<Path>>(path: P) -> CsvResult<Vec<RecipientRow>> {
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);

    let headers = rdr.headers()?;
    validate_headers(headers.iter(), RECIPIENTS_CSV_HEADERS, "recipients.csv")?;

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let row: RecipientRow = result.map_err(|e| classify_row_error(e, i + 1))?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(CsvError::SchemaValidation(
            "Recipients CSV file is empty".to_string(),
        ));
    }

    Ok(rows)
}

/// Surfaces a bad address column as `InvalidAddress` instead of a generic CSV error.
fn classify_row_error(error: csv::Error, row: usize) -> CsvError {
    if let csv::ErrorKind::Deserialize { err, .. } = error.kind() {
        // the address column is the only one with a custom deserializer
        let address_column = err.field() == Some(0)
            || matches!(err.kind(), csv::DeserializeErrorKind::Message(_));
        if address_column {
            return CsvError::InvalidAddress {
                row,
                message: err.to_string(),
            };
        }
    }
    CsvError::Csv(error)
}

// ================================================================================================
// CSV Writing
// ================================================================================================

/// Write recipients CSV (the csv crate writes the header row)
pub fn write_recipients_csv<P: AsRef<Path>>(path: P, rows: &[RecipientRow]) -> CsvResult<()> {
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

// ================================================================================================
// Semantic Validation
// ================================================================================================

/// Scales every amount to base units and checks the list can be committed.
///
/// Rejects zero and malformed amounts and any address listed more than once.
/// Row numbers in errors are 1-based data rows (the header is not counted).
pub fn validate_recipients(rows: &[RecipientRow]) -> CsvResult<Vec<(Address, U256)>> {
    let mut first_seen: HashMap<Address, usize> = HashMap::with_capacity(rows.len());
    let mut allocations = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 1;

        if let Some(first_row) = first_seen.insert(row.address, row_number) {
            return Err(CsvError::DuplicateRecipient {
                address: format_address(&row.address),
                first_row,
                row: row_number,
            });
        }

        let amount = parse_token_amount(&row.amount, TOKEN_DECIMALS).map_err(|e| {
            CsvError::InvalidAmount {
                row: row_number,
                message: e.to_string(),
            }
        })?;
        if amount.is_zero() {
            return Err(CsvError::InvalidAmount {
                row: row_number,
                message: "amount must be greater than zero".to_string(),
            });
        }

        allocations.push((row.address, amount));
    }

    Ok(allocations)
}

// ================================================================================================
// Header Validation
// ================================================================================================

fn validate_headers<'a, I>(actual: I, expected: &[&str], file_type: &str) -> CsvResult<()>
where
    I: Iterator<Item = &'a str>,
{
    let actual_headers: Vec<&str> = actual.collect();

    if actual_headers.len() != expected.len() {
        return Err(CsvError::SchemaValidation(format!(
            "{}: expected {} headers, found {}",
            file_type,
            expected.len(),
            actual_headers.len()
        )));
    }

    for (i, (actual, expected)) in actual_headers.iter().zip(expected.iter()).enumerate() {
        if actual != expected {
            return Err(CsvError::SchemaValidation(format!(
                "{}: header {} should be '{}', found '{}'",
                file_type,
                i + 1,
                expected,
                actual
            )));
        }
    }

    Ok(())
}

// ================================================================================================
// Tests
// ================================================================================================
