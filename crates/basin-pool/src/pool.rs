//! Pool construction and access control

use std::sync::{Mutex, MutexGuard};

use basin_core::{AccountId, AssetId, Error, PoolConfig, Result};
use basin_ledger::{LedgerClient, LedgerHandle};

use crate::events::EventLog;
use crate::state::{PoolSnapshot, Reserves};

/// A two-asset constant-product pool.
///
/// Construction fixes the owner and both asset identities for the pool's
/// lifetime; reserves start empty and change only through the liquidity and
/// swap operations. Every mutating operation serializes on the reserve
/// lock, holding it across its ledger transfers, so no caller ever observes
/// partially-updated reserves.
pub struct Pool {
    owner: AccountId,
    ledger_a: LedgerClient,
    ledger_b: LedgerClient,
    reserves: Mutex<Reserves>,
    events: EventLog,
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("owner", &self.owner)
            .field("reserves", &self.reserves)
            .finish_non_exhaustive()
    }
}

impl Pool {
    /// Create an empty pool. `owner` is the constructing principal and the
    /// only account allowed to manage liquidity.
    pub fn new(
        config: PoolConfig,
        owner: AccountId,
        ledger_a: LedgerHandle,
        ledger_b: LedgerHandle,
    ) -> Result<Self> {
        config.validate()?;
        let PoolConfig {
            pool_account,
            asset_a,
            asset_b,
        } = config;
        Ok(Self {
            owner,
            ledger_a: LedgerClient::new(ledger_a, asset_a, pool_account.clone()),
            ledger_b: LedgerClient::new(ledger_b, asset_b, pool_account),
            reserves: Mutex::new(Reserves::default()),
            events: EventLog::new(),
        })
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn asset_a(&self) -> &AssetId {
        self.ledger_a.asset()
    }

    pub fn asset_b(&self) -> &AssetId {
        self.ledger_b.asset()
    }

    /// Events recorded by completed operations
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Whether `caller` is the pool owner
    pub fn is_owner(&self, caller: &AccountId) -> bool {
        *caller == self.owner
    }

    /// Current reserve counters
    pub fn reserves(&self) -> Reserves {
        *self.lock_reserves()
    }

    /// Both reserve sides funded
    pub fn is_funded(&self) -> bool {
        self.lock_reserves().is_funded()
    }

    /// Read-only view of the pool
    pub fn snapshot(&self) -> PoolSnapshot {
        let reserves = self.reserves();
        PoolSnapshot {
            asset_a: self.asset_a().clone(),
            asset_b: self.asset_b().clone(),
            reserve_a: reserves.a,
            reserve_b: reserves.b,
            funded: reserves.is_funded(),
        }
    }

    pub(crate) fn require_owner(&self, caller: &AccountId) -> Result<()> {
        if !self.is_owner(caller) {
            return Err(Error::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn ledger_a(&self) -> &LedgerClient {
        &self.ledger_a
    }

    pub(crate) fn ledger_b(&self) -> &LedgerClient {
        &self.ledger_b
    }

    pub(crate) fn lock_reserves(&self) -> MutexGuard<'_, Reserves> {
        self.reserves.lock().expect("pool reserve lock poisoned")
    }
}
