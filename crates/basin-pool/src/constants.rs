//! Pool constants

/// Spot price fixed-point parameters
pub mod price {
    use basin_core::Amount;

    /// Price scale: one whole unit under the 18-decimal convention
    pub const SCALE: Amount = 1_000_000_000_000_000_000;
}
