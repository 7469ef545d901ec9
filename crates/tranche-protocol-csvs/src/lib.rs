/*!
# Tranche Protocol CSV Schema Definitions

This crate provides the **authoritative CSV schema** for airdrop recipient lists.

## Purpose

The schema is the data contract between:

- **`generate-fixtures`** (producer) → Creates recipient CSV files
- **`compile-airdrop`** (consumer) → Reads them and builds the claim tree

## Schema Files

### Recipients CSV (`recipients.csv`)
One row per recipient, with columns:
- `address`: 20-byte hex address, `0x` prefix optional
- `amount`: token quantity as a decimal string (e.g. `1000` or `12.5`),
  scaled to 18 decimals during validation

## Usage

```rust,no_run
use tranche_protocol_csvs::{read_recipients_csv, validate_recipients, CsvResult};

fn example() -> CsvResult<()> {
    let rows = read_recipients_csv("recipients.csv")?;
    let allocations = validate_recipients(&rows)?;
    println!("{} recipients", allocations.len());
    Ok(())
}
```
*/

pub mod errors;
pub mod schemas;
pub mod validation;

// Re-export main types for convenience
pub use errors::{CsvError, CsvResult};
pub use schemas::{RecipientRow, RECIPIENTS_CSV_HEADERS};
pub use validation::{read_recipients_csv, validate_recipients, write_recipients_csv};
