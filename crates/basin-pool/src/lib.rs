//! Constant-Product Liquidity Pool
//!
//! Two-asset pool with admin-gated liquidity and permissionless swaps
//! priced by the x * y = k invariant. Asset balances live on external
//! ledgers; the pool tracks reserves and moves funds through its custody
//! account, rolling back partial transfers whenever an operation aborts.

pub mod calculator;
pub mod constants;
pub mod events;
pub mod liquidity;
pub mod pool;
pub mod price;
pub mod state;
pub mod swap;

// Re-exports
pub use calculator::{amount_in_for, amount_out, spot_price};
pub use events::EventLog;
pub use liquidity::LiquiditySummary;
pub use pool::Pool;
pub use state::{PoolEvent, PoolSnapshot, Reserves};
pub use swap::SwapSummary;
