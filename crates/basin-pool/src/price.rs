//! Spot price oracle
//!
//! Read-only: derives the instantaneous exchange rate from the reserve
//! ratio, scaled to 1e18 fixed point. No smoothing and no trade execution;
//! the quoted price is exactly the current ratio.

use basin_core::{Amount, AssetId, Error, Result};

use crate::calculator;
use crate::pool::Pool;

impl Pool {
    /// Fixed-point (1e18) amount of the counter-asset one unit of `asset`
    /// is currently worth.
    pub fn price_of(&self, asset: &AssetId) -> Result<Amount> {
        let reserves = self.reserves();
        if asset == self.asset_a() {
            calculator::spot_price(reserves.a, reserves.b)
        } else if asset == self.asset_b() {
            calculator::spot_price(reserves.b, reserves.a)
        } else {
            Err(Error::UnsupportedAsset(asset.clone()))
        }
    }
}
