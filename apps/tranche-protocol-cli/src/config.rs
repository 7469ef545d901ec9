use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tranche_protocol::{parse_address, parse_token_amount, Address, VestingSchedule, TOKEN_DECIMALS, U256};

use crate::error::{CliError, CliResult};

/// Round configuration file structure (`round.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Human-readable round name (for organization)
    pub round_name: String,

    /// Address allowed to publish the merkle root
    pub admin: String,

    /// Release curve applied to every allocation
    #[serde(default)]
    pub vesting: VestingSchedule,

    /// Tokens deposited into the local pool, as a decimal quantity
    pub pool_balance: String,

    /// Where ledger and pool state is kept between invocations.
    /// Relative paths resolve against the config file's directory.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

impl RoundConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: RoundConfig = serde_yaml::from_str(&contents)?;

        if config.state_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.state_file = dir.join(&config.state_file);
            }
        }

        config.vesting.validate()?;
        config.admin_address()?;
        config.pool_balance_units()?;
        Ok(config)
    }

    pub fn admin_address(&self) -> CliResult<Address> {
        parse_address(&self.admin)
            .map_err(|e| CliError::InvalidConfig(format!("admin '{}': {}", self.admin, e)))
    }

    pub fn pool_balance_units(&self) -> CliResult<U256> {
        parse_token_amount(&self.pool_balance, TOKEN_DECIMALS).map_err(|e| {
            CliError::InvalidConfig(format!("pool_balance '{}': {}", self.pool_balance, e))
        })
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from("round-state.json")
}
