//! Error types for basin

use thiserror::Error;

use crate::types::{AccountId, Amount, AssetId};

/// Failures surfaced by an external asset ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {required}, have {available}")]
    InsufficientBalance {
        required: Amount,
        available: Amount,
    },

    #[error("insufficient allowance: need {required}, have {available}")]
    InsufficientAllowance {
        required: Amount,
        available: Amount,
    },

    #[error("ledger balance arithmetic overflowed")]
    Overflow,
}

/// Errors that abort a pool operation
///
/// Every failure rolls the whole operation back before it surfaces; the
/// caller never observes a partially-applied transition.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ledger transfer failed: {0}")]
    LedgerTransferFailed(#[from] LedgerError),

    #[error("caller {caller} is not the pool owner")]
    Unauthorized { caller: AccountId },

    #[error("insufficient reserves: requested {requested}, available {available}")]
    InsufficientReserves {
        requested: Amount,
        available: Amount,
    },

    #[error("swap amount must be greater than zero")]
    InvalidAmount,

    #[error("pool reserves are empty on at least one side")]
    InvalidReserves,

    #[error("asset {0} is not traded by this pool")]
    UnsupportedAsset(AssetId),

    #[error("reserve arithmetic overflowed")]
    AmountOverflow,

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for basin operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::LedgerTransferFailed(_) => "ledger_transfer_failed",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InsufficientReserves { .. } => "insufficient_reserves",
            Self::InvalidAmount => "invalid_amount",
            Self::InvalidReserves => "invalid_reserves",
            Self::UnsupportedAsset(_) => "unsupported_asset",
            Self::AmountOverflow => "amount_overflow",
            Self::Config(_) => "config_error",
        }
    }
}
