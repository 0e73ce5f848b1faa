//! Admin liquidity management
//!
//! Deposits pull both assets into custody before the reserve counters move;
//! withdrawals are bounded by the current reserves. A failure after the
//! first transfer unwinds it, so the operation is all-or-nothing.

use serde::{Deserialize, Serialize};

use basin_core::{AccountId, Amount, Error, Result};
use basin_ledger::TransferJournal;

use crate::pool::Pool;
use crate::state::{PoolEvent, Reserves};

/// Summary of a completed liquidity operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquiditySummary {
    pub provider: AccountId,
    pub amount_a: Amount,
    pub amount_b: Amount,
    pub reserve_a: Amount,
    pub reserve_b: Amount,
}

impl Pool {
    /// Deposit `amount_a` of asset A and `amount_b` of asset B. Owner-only.
    ///
    /// Both pulls ride the allowances the owner granted to the pool's
    /// custody account ahead of time.
    pub fn add_liquidity(
        &self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquiditySummary> {
        self.require_owner(caller)?;

        let mut reserves = self.lock_reserves();
        let mut journal = TransferJournal::new();

        let applied = (|| -> Result<Reserves> {
            self.ledger_a().pull(caller, amount_a, &mut journal)?;
            self.ledger_b().pull(caller, amount_b, &mut journal)?;
            let a = reserves
                .a
                .checked_add(amount_a)
                .ok_or(Error::AmountOverflow)?;
            let b = reserves
                .b
                .checked_add(amount_b)
                .ok_or(Error::AmountOverflow)?;
            Ok(Reserves { a, b })
        })();

        let next = match applied {
            Ok(next) => next,
            Err(e) => {
                journal.unwind();
                tracing::warn!(error = %e, "liquidity deposit aborted, transfers unwound");
                return Err(e);
            }
        };
        *reserves = next;
        journal.commit();
        drop(reserves);

        self.events().append(PoolEvent::LiquidityAdded {
            provider: caller.clone(),
            amount_a,
            amount_b,
        });
        tracing::info!(
            provider = %caller,
            amount_a,
            amount_b,
            reserve_a = next.a,
            reserve_b = next.b,
            "liquidity added"
        );

        Ok(LiquiditySummary {
            provider: caller.clone(),
            amount_a,
            amount_b,
            reserve_a: next.a,
            reserve_b: next.b,
        })
    }

    /// Withdraw `amount_a` of asset A and `amount_b` of asset B to the
    /// owner. Owner-only; bounded by the current reserves.
    pub fn remove_liquidity(
        &self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquiditySummary> {
        self.require_owner(caller)?;

        let mut reserves = self.lock_reserves();
        if amount_a > reserves.a {
            return Err(Error::InsufficientReserves {
                requested: amount_a,
                available: reserves.a,
            });
        }
        if amount_b > reserves.b {
            return Err(Error::InsufficientReserves {
                requested: amount_b,
                available: reserves.b,
            });
        }

        let mut journal = TransferJournal::new();
        let pushed = (|| -> Result<()> {
            self.ledger_a().push(caller, amount_a, &mut journal)?;
            self.ledger_b().push(caller, amount_b, &mut journal)?;
            Ok(())
        })();
        if let Err(e) = pushed {
            journal.unwind();
            tracing::warn!(error = %e, "liquidity withdrawal aborted, transfers unwound");
            return Err(e);
        }

        // Bounds checked above
        reserves.a -= amount_a;
        reserves.b -= amount_b;
        journal.commit();
        let next = *reserves;
        drop(reserves);

        self.events().append(PoolEvent::LiquidityRemoved {
            provider: caller.clone(),
            amount_a,
            amount_b,
        });
        tracing::info!(
            provider = %caller,
            amount_a,
            amount_b,
            reserve_a = next.a,
            reserve_b = next.b,
            "liquidity removed"
        );

        Ok(LiquiditySummary {
            provider: caller.clone(),
            amount_a,
            amount_b,
            reserve_a: next.a,
            reserve_b: next.b,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use basin_core::{AssetId, PoolConfig};
    use basin_ledger::{AssetLedger, InMemoryLedger};

    use super::*;

    struct Fixture {
        pool: Pool,
        ledger_a: Arc<InMemoryLedger>,
        ledger_b: Arc<InMemoryLedger>,
        admin: AccountId,
        custody: AccountId,
    }

    fn fixture() -> Fixture {
        let ledger_a = Arc::new(InMemoryLedger::new());
        let ledger_b = Arc::new(InMemoryLedger::new());
        let admin = AccountId::new("admin");
        let custody = AccountId::new("pool-custody");

        ledger_a.mint(&admin, 1_000_000).unwrap();
        ledger_b.mint(&admin, 1_000_000).unwrap();
        ledger_a.approve(&admin, &custody, 1_000_000).unwrap();
        ledger_b.approve(&admin, &custody, 1_000_000).unwrap();

        let config = PoolConfig::new(
            custody.clone(),
            AssetId::new("token-a"),
            AssetId::new("token-b"),
        );
        let pool = Pool::new(
            config,
            admin.clone(),
            Arc::clone(&ledger_a) as _,
            Arc::clone(&ledger_b) as _,
        )
        .unwrap();

        Fixture {
            pool,
            ledger_a,
            ledger_b,
            admin,
            custody,
        }
    }

    #[test]
    fn test_add_liquidity_updates_reserves_and_custody() {
        let fx = fixture();
        let summary = fx.pool.add_liquidity(&fx.admin, 1_000, 2_000).unwrap();
        assert_eq!(summary.reserve_a, 1_000);
        assert_eq!(summary.reserve_b, 2_000);
        assert_eq!(fx.ledger_a.balance_of(&fx.custody), 1_000);
        assert_eq!(fx.ledger_b.balance_of(&fx.custody), 2_000);
        assert!(matches!(
            fx.pool.events().snapshot()[0],
            PoolEvent::LiquidityAdded {
                amount_a: 1_000,
                amount_b: 2_000,
                ..
            }
        ));
    }

    #[test]
    fn test_non_owner_cannot_add() {
        let fx = fixture();
        let err = fx
            .pool
            .add_liquidity(&AccountId::new("alice"), 10, 10)
            .unwrap_err();
        assert_eq!(err.code(), "unauthorized");
        assert_eq!(fx.pool.reserves(), Reserves::default());
        assert!(fx.pool.events().is_empty());
    }

    #[test]
    fn test_failed_second_pull_unwinds_first() {
        let fx = fixture();
        // Revoke the asset-B allowance so the second pull fails
        fx.ledger_b.approve(&fx.admin, &fx.custody, 0).unwrap();

        let err = fx.pool.add_liquidity(&fx.admin, 1_000, 2_000).unwrap_err();
        assert_eq!(err.code(), "ledger_transfer_failed");

        // The completed asset-A pull was reversed
        assert_eq!(fx.ledger_a.balance_of(&fx.admin), 1_000_000);
        assert_eq!(fx.ledger_a.balance_of(&fx.custody), 0);
        assert_eq!(fx.pool.reserves(), Reserves::default());
        assert!(fx.pool.events().is_empty());
    }

    #[test]
    fn test_remove_liquidity_round_trip() {
        let fx = fixture();
        fx.pool.add_liquidity(&fx.admin, 1_000, 2_000).unwrap();
        fx.pool.remove_liquidity(&fx.admin, 1_000, 2_000).unwrap();

        assert_eq!(fx.pool.reserves(), Reserves::default());
        assert_eq!(fx.ledger_a.balance_of(&fx.admin), 1_000_000);
        assert_eq!(fx.ledger_b.balance_of(&fx.admin), 1_000_000);
        assert_eq!(fx.pool.events().len(), 2);
    }

    #[test]
    fn test_remove_more_than_reserves() {
        let fx = fixture();
        fx.pool.add_liquidity(&fx.admin, 100, 100).unwrap();
        let err = fx.pool.remove_liquidity(&fx.admin, 101, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientReserves {
                requested: 101,
                available: 100
            }
        ));
        assert_eq!(fx.pool.reserves(), Reserves { a: 100, b: 100 });
    }

    #[test]
    fn test_non_owner_cannot_remove() {
        let fx = fixture();
        fx.pool.add_liquidity(&fx.admin, 100, 100).unwrap();
        let err = fx
            .pool
            .remove_liquidity(&AccountId::new("mallory"), 1, 1)
            .unwrap_err();
        assert_eq!(err.code(), "unauthorized");
        assert_eq!(fx.pool.reserves(), Reserves { a: 100, b: 100 });
    }
}
