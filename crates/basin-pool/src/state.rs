//! Pool state types
//!
//! Reserve counters, read-only snapshots, and the lifecycle events recorded
//! after each successful transition.

use serde::{Deserialize, Serialize};
use std::fmt;

use basin_core::{AccountId, Amount, AssetId};

/// The two reserve counters. Both start at zero and change only inside the
/// four mutating operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserves {
    pub a: Amount,
    pub b: Amount,
}

impl Reserves {
    /// Both sides funded: swaps and price queries are enabled
    pub fn is_funded(&self) -> bool {
        self.a > 0 && self.b > 0
    }
}

/// Read-only view of one pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub asset_a: AssetId,
    pub asset_b: AssetId,
    pub reserve_a: Amount,
    pub reserve_b: Amount,
    pub funded: bool,
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool {}/{} | reserves: {} / {}",
            self.asset_a, self.asset_b, self.reserve_a, self.reserve_b
        )
    }
}

/// Lifecycle events, appended to the pool's log after each successful
/// state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PoolEvent {
    LiquidityAdded {
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    },
    LiquidityRemoved {
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    },
    Swapped {
        trader: AccountId,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
        amount_out: Amount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funded_requires_both_sides() {
        assert!(!Reserves::default().is_funded());
        assert!(!Reserves { a: 10, b: 0 }.is_funded());
        assert!(!Reserves { a: 0, b: 10 }.is_funded());
        assert!(Reserves { a: 1, b: 1 }.is_funded());
    }

    #[test]
    fn test_snapshot_display() {
        let snapshot = PoolSnapshot {
            asset_a: AssetId::new("token-a"),
            asset_b: AssetId::new("token-b"),
            reserve_a: 1_000,
            reserve_b: 2_000,
            funded: true,
        };
        assert_eq!(
            snapshot.to_string(),
            "Pool token-a/token-b | reserves: 1000 / 2000"
        );
    }

    #[test]
    fn test_event_serialization_tags_variant() {
        let event = PoolEvent::Swapped {
            trader: AccountId::new("alice"),
            asset_in: AssetId::new("token-a"),
            asset_out: AssetId::new("token-b"),
            amount_in: 100,
            amount_out: 181,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Swapped\""));
        let parsed: PoolEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
