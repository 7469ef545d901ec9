use {
    crate::airdrop_compiler::CompilerResult,
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
    tranche_protocol::{parse_address, parse_amount, parse_hash, Address, ClaimProof, U256},
};

/// Published airdrop artifact.
///
/// ```json
/// {"root": "0x…", "users": [{"address": "0x…", "proof": ["0x…"], "value": "1000000000000000000000"}]}
/// ```
///
/// Only `root` has to be published on the settlement layer; each `users` entry
/// can be handed to its recipient on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropData {
    pub root: String,
    pub users: Vec<UserData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub address: String,
    pub proof: Vec<String>,
    /// Allocation in base units, as a decimal string.
    pub value: String,
}

impl AirdropData {
    pub fn root_bytes(&self) -> CompilerResult<[u8; 32]> {
        Ok(parse_hash(&self.root)?)
    }

    /// Looks up a recipient; address comparison ignores case and `0x`.
    pub fn find_user(&self, address: &Address) -> CompilerResult<Option<&UserData>> {
        for user in &self.users {
            if user.claimant()? == *address {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> CompilerResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> CompilerResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl UserData {
    pub fn claimant(&self) -> CompilerResult<Address> {
        Ok(parse_address(&self.address)?)
    }

    pub fn allocation(&self) -> CompilerResult<U256> {
        Ok(parse_amount(&self.value)?)
    }

    pub fn proof(&self) -> CompilerResult<ClaimProof> {
        Ok(ClaimProof::from_hex_strings(&self.proof)?)
    }
}
