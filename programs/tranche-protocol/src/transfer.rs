use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Insufficient pool balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: U256, available: U256 },
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

/// Value-moving capability the claim engine gates.
///
/// Implementations either move exactly `amount` to `to` or fail without side
/// effects; the ledger only commits a claim after this returns `Ok`.
pub trait TokenTransfer: Send + Sync {
    fn transfer(&self, to: &Address, amount: U256) -> Result<(), TransferError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub balance: U256,
    pub credited: BTreeMap<Address, U256>,
}

/// In-memory token pool that pays claims out of a fixed balance.
#[derive(Debug, Default)]
pub struct TokenPool {
    state: Mutex<PoolState>,
}

impl TokenPool {
    pub fn new(balance: U256) -> Self {
        Self::from_state(PoolState {
            balance,
            credited: BTreeMap::new(),
        })
    }

    pub fn from_state(state: PoolState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn state(&self) -> PoolState {
        self.lock().clone()
    }

    pub fn balance(&self) -> U256 {
        self.lock().balance
    }

    /// Total ever credited to `address` by this pool.
    pub fn balance_of(&self, address: &Address) -> U256 {
        self.lock()
            .credited
            .get(address)
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn deposit(&self, amount: U256) -> Result<(), TransferError> {
        let mut state = self.lock();
        state.balance = state
            .balance
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("pool balance overflow".to_string()))?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenTransfer for TokenPool {
    fn transfer(&self, to: &Address, amount: U256) -> Result<(), TransferError> {
        let mut state = self.lock();
        if state.balance < amount {
            return Err(TransferError::InsufficientBalance {
                requested: amount,
                available: state.balance,
            });
        }

        let credited = state.credited.get(to).copied().unwrap_or(U256::ZERO);
        let credited = credited
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("recipient balance overflow".to_string()))?;

        state.balance -= amount;
        state.credited.insert(*to, credited);
        Ok(())
    }
}
