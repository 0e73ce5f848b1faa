//! Swap entry points
//!
//! Permissionless: any caller trades against the pool at the constant
//! product price. The output is quoted from the pre-trade reserves, both
//! transfers execute under the reserve lock, and the counters move last.

use serde::{Deserialize, Serialize};

use basin_core::{AccountId, Amount, AssetId, Error, Result};
use basin_ledger::TransferJournal;

use crate::calculator;
use crate::pool::Pool;
use crate::state::PoolEvent;

/// Summary of a completed swap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSummary {
    pub trader: AccountId,
    pub asset_in: AssetId,
    pub asset_out: AssetId,
    pub amount_in: Amount,
    pub amount_out: Amount,
}

#[derive(Clone, Copy)]
enum Direction {
    AForB,
    BForA,
}

impl Pool {
    /// Swap `amount_in` of asset A for asset B
    pub fn swap_a_for_b(&self, caller: &AccountId, amount_in: Amount) -> Result<SwapSummary> {
        self.execute_swap(caller, amount_in, Direction::AForB)
    }

    /// Swap `amount_in` of asset B for asset A
    pub fn swap_b_for_a(&self, caller: &AccountId, amount_in: Amount) -> Result<SwapSummary> {
        self.execute_swap(caller, amount_in, Direction::BForA)
    }

    fn execute_swap(
        &self,
        caller: &AccountId,
        amount_in: Amount,
        direction: Direction,
    ) -> Result<SwapSummary> {
        let mut reserves = self.lock_reserves();

        let (reserve_in, reserve_out) = match direction {
            Direction::AForB => (reserves.a, reserves.b),
            Direction::BForA => (reserves.b, reserves.a),
        };
        let amount_out = calculator::amount_out(amount_in, reserve_in, reserve_out)?;

        let (ledger_in, ledger_out) = match direction {
            Direction::AForB => (self.ledger_a(), self.ledger_b()),
            Direction::BForA => (self.ledger_b(), self.ledger_a()),
        };

        let mut journal = TransferJournal::new();
        let applied = (|| -> Result<(Amount, Amount)> {
            ledger_in.pull(caller, amount_in, &mut journal)?;
            ledger_out.push(caller, amount_out, &mut journal)?;
            let next_in = reserve_in
                .checked_add(amount_in)
                .ok_or(Error::AmountOverflow)?;
            let next_out = reserve_out
                .checked_sub(amount_out)
                .ok_or(Error::AmountOverflow)?;
            Ok((next_in, next_out))
        })();

        let (next_in, next_out) = match applied {
            Ok(next) => next,
            Err(e) => {
                journal.unwind();
                tracing::warn!(error = %e, "swap aborted, transfers unwound");
                return Err(e);
            }
        };
        match direction {
            Direction::AForB => {
                reserves.a = next_in;
                reserves.b = next_out;
            }
            Direction::BForA => {
                reserves.b = next_in;
                reserves.a = next_out;
            }
        }
        journal.commit();
        drop(reserves);

        let (asset_in, asset_out) = match direction {
            Direction::AForB => (self.asset_a().clone(), self.asset_b().clone()),
            Direction::BForA => (self.asset_b().clone(), self.asset_a().clone()),
        };
        self.events().append(PoolEvent::Swapped {
            trader: caller.clone(),
            asset_in: asset_in.clone(),
            asset_out: asset_out.clone(),
            amount_in,
            amount_out,
        });
        tracing::info!(
            trader = %caller,
            %asset_in,
            %asset_out,
            amount_in,
            amount_out,
            "swap executed"
        );

        Ok(SwapSummary {
            trader: caller.clone(),
            asset_in,
            asset_out,
            amount_in,
            amount_out,
        })
    }
}
