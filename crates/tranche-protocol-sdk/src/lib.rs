mod airdrop_compiler;
mod airdrop_data;

pub use airdrop_compiler::*;
pub use airdrop_data::{AirdropData, UserData};
pub use tranche_protocol::*;
pub use tranche_protocol_merkle::{AirdropTree, ClaimTree, MerkleError};
