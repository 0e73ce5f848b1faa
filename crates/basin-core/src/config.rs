//! Configuration types for basin

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::types::{AccountId, AssetId};

/// Static configuration for one pool instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Custody account the pool controls on both asset ledgers
    pub pool_account: AccountId,

    /// First traded asset
    pub asset_a: AssetId,

    /// Second traded asset
    pub asset_b: AssetId,
}

impl PoolConfig {
    pub fn new(pool_account: AccountId, asset_a: AssetId, asset_b: AssetId) -> Self {
        Self {
            pool_account,
            asset_a,
            asset_b,
        }
    }

    /// Reject degenerate setups before a pool is constructed
    pub fn validate(&self) -> Result<()> {
        if self.pool_account.as_str().is_empty() {
            return Err(Error::Config("pool account id is empty".to_string()));
        }
        if self.asset_a.as_str().is_empty() || self.asset_b.as_str().is_empty() {
            return Err(Error::Config("asset id is empty".to_string()));
        }
        if self.asset_a == self.asset_b {
            return Err(Error::Config(format!(
                "pool assets must be distinct, got {} twice",
                self.asset_a
            )));
        }
        Ok(())
    }
}
