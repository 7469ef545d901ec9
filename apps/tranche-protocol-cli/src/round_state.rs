use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tranche_protocol::{
    format_address, format_hash, AirdropDistributor, LedgerSnapshot, PoolState, TokenPool,
    VestingSchedule,
};
use tranche_protocol_sdk::AirdropData;

use crate::config::RoundConfig;
use crate::error::{CliError, CliResult};

/// Everything the local distributor needs to survive between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub merkle_root: Option<String>,
    /// Admin and schedule the round was opened with; fixed for its lifetime.
    pub admin: String,
    pub vesting: VestingSchedule,
    pub ledger: LedgerSnapshot,
    pub pool: PoolState,
}

impl RoundState {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Replaces `path` atomically: the state is written to a sibling temp
    /// file, synced, then renamed over the target.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> CliResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Opens the round's distributor, publishing the artifact's root on first use.
pub fn open_distributor(
    config: &RoundConfig,
    airdrop_data: &AirdropData,
) -> CliResult<AirdropDistributor<TokenPool>> {
    let admin = config.admin_address()?;
    let root = airdrop_data.root_bytes()?;

    if !config.state_file.exists() {
        info!(round = %config.round_name, "starting new round state");
        let pool = TokenPool::new(config.pool_balance_units()?);
        let distributor = AirdropDistributor::new(admin, config.vesting.clone(), pool)?;
        distributor.set_root(&admin, root)?;
        return Ok(distributor);
    }

    debug!(path = %config.state_file.display(), "loading round state");
    let state = RoundState::read_from_file(&config.state_file)?;
    if state.vesting != config.vesting {
        return Err(CliError::InvalidConfig(format!(
            "vesting schedule in config differs from the one round state {} was opened with ({:?})",
            config.state_file.display(),
            state.vesting
        )));
    }
    if !state.admin.eq_ignore_ascii_case(&format_address(&admin)) {
        return Err(CliError::InvalidConfig(format!(
            "admin {} differs from the round state admin {}",
            config.admin, state.admin
        )));
    }
    if let Some(stored) = &state.merkle_root {
        if !stored.eq_ignore_ascii_case(&airdrop_data.root) {
            return Err(CliError::InvalidConfig(format!(
                "state file {} belongs to root {}, airdrop data has {}",
                config.state_file.display(),
                stored,
                airdrop_data.root
            )));
        }
    }

    Ok(AirdropDistributor::restore(
        admin,
        config.vesting.clone(),
        Some(root),
        state.ledger,
        TokenPool::from_state(state.pool),
    )?)
}

pub fn save_distributor(
    config: &RoundConfig,
    distributor: &AirdropDistributor<TokenPool>,
) -> CliResult<()> {
    let state = RoundState {
        merkle_root: distributor.merkle_root().map(|root| format_hash(&root)),
        admin: format_address(distributor.admin()),
        vesting: distributor.ledger().schedule().clone(),
        ledger: distributor.ledger().snapshot(),
        pool: distributor.token().state(),
    };
    state.write_to_file(&config.state_file)?;
    debug!(path = %config.state_file.display(), "saved round state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands;
    use std::path::{Path, PathBuf};
    use tranche_protocol::{ClaimStatus, U256};

    const ADMIN: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn setup_round(dir: &Path) -> (PathBuf, PathBuf) {
        let csv_path = dir.join("recipients.csv");
        let data_path = dir.join("airdrop.json");
        let config_path = dir.join("round.yaml");

        commands::generate_fixtures::execute(4, 9, csv_path.clone(), 10, 10).unwrap();
        commands::compile_airdrop::execute(csv_path, data_path.clone()).unwrap();
        std::fs::write(
            &config_path,
            format!(
                "round_name: test\nadmin: \"{}\"\npool_balance: \"1000\"\nvesting:\n  kind: linear\n  start: 1000\n  duration_seconds: 100\n",
                ADMIN
            ),
        )
        .unwrap();
        (data_path, config_path)
    }

    #[test]
    fn test_claims_persist_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let (data_path, config_path) = setup_round(dir.path());
        let data = AirdropData::read_from_file(&data_path).unwrap();
        let claimant = data.users[0].claimant().unwrap();
        let allocation = data.users[0].allocation().unwrap();
        let address = data.users[0].address.clone();

        // half vested
        commands::claim_tokens::execute(
            data_path.clone(),
            config_path.clone(),
            address.clone(),
            "all".to_string(),
            Some("1050".to_string()),
        )
        .unwrap();

        let config = RoundConfig::load(&config_path).unwrap();
        assert!(config.state_file.exists());
        let distributor = open_distributor(&config, &data).unwrap();
        let record = distributor.ledger().record(&claimant).unwrap();
        assert_eq!(record.claimed_amount, allocation / U256::from(2u64));
        assert_eq!(
            distributor.ledger().status(&claimant, allocation),
            ClaimStatus::PartiallyClaimed
        );

        // nothing new unlocked at the same instant
        let err = commands::claim_tokens::execute(
            data_path.clone(),
            config_path.clone(),
            address.clone(),
            "all".to_string(),
            Some("1050".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Protocol(_)));

        commands::claim_tokens::execute(
            data_path.clone(),
            config_path.clone(),
            address,
            "all".to_string(),
            Some("1100".to_string()),
        )
        .unwrap();

        let distributor = open_distributor(&config, &data).unwrap();
        assert_eq!(
            distributor.ledger().status(&claimant, allocation),
            ClaimStatus::FullyClaimed
        );
        assert_eq!(distributor.token().balance_of(&claimant), allocation);
        commands::query_claims::execute(data_path, config_path).unwrap();
    }

    #[test]
    fn test_state_from_another_round_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (data_path, config_path) = setup_round(dir.path());
        let config = RoundConfig::load(&config_path).unwrap();

        let mut data = AirdropData::read_from_file(&data_path).unwrap();
        save_distributor(&config, &open_distributor(&config, &data).unwrap()).unwrap();

        data.root = format_hash(&[0x42; 32]);
        assert!(matches!(
            open_distributor(&config, &data),
            Err(CliError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_vesting_change_after_first_claim_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (data_path, config_path) = setup_round(dir.path());
        let data = AirdropData::read_from_file(&data_path).unwrap();
        let address = data.users[0].address.clone();

        commands::claim_tokens::execute(
            data_path.clone(),
            config_path.clone(),
            address.clone(),
            "all".to_string(),
            Some("1010".to_string()),
        )
        .unwrap();
        let before = std::fs::read_to_string(dir.path().join("round-state.json")).unwrap();

        // switching the live round to immediate would release everything at once
        std::fs::write(
            &config_path,
            format!(
                "round_name: test\nadmin: \"{}\"\npool_balance: \"1000\"\nvesting:\n  kind: immediate\n",
                ADMIN
            ),
        )
        .unwrap();

        let err = commands::claim_tokens::execute(
            data_path,
            config_path,
            address,
            "all".to_string(),
            Some("1010".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));

        let after = std::fs::read_to_string(dir.path().join("round-state.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_admin_change_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (data_path, config_path) = setup_round(dir.path());
        let data = AirdropData::read_from_file(&data_path).unwrap();

        let mut config = RoundConfig::load(&config_path).unwrap();
        save_distributor(&config, &open_distributor(&config, &data).unwrap()).unwrap();

        config.admin = "0x90F79bf6EB2c4f870365E785982E1f101E93b906".to_string();
        assert!(matches!(
            open_distributor(&config, &data),
            Err(CliError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_state_file_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "stale contents that are longer than nothing at all").unwrap();

        let state = RoundState {
            merkle_root: Some(format_hash(&[0x11; 32])),
            ..RoundState::default()
        };
        state.write_to_file(&path).unwrap();

        let restored = RoundState::read_from_file(&path).unwrap();
        assert_eq!(restored.merkle_root, state.merkle_root);
        assert_eq!(restored.vesting, VestingSchedule::Immediate);
        // only the target remains; the temp file was renamed over it
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unknown_recipient() {
        let dir = tempfile::tempdir().unwrap();
        let (data_path, config_path) = setup_round(dir.path());
        let err = commands::check_eligibility::execute(
            data_path.clone(),
            config_path,
            ADMIN.to_string(),
            Some("1050".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::RecipientNotFound(_)));
        assert!(commands::verify_proof::execute(data_path, ADMIN.to_string()).is_err());
    }
}
