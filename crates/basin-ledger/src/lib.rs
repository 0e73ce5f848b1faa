//! External asset-ledger capability
//!
//! The pool never does balance bookkeeping itself: each traded asset lives
//! on an external ledger reached through the [`AssetLedger`] trait. This
//! crate defines that capability, a reference in-memory implementation, and
//! the custody client the pool uses to move funds with journaled rollback.

pub mod client;
pub mod memory;

use std::sync::Arc;

use basin_core::{AccountId, Amount, LedgerError};

/// External fungible-asset ledger capability.
///
/// All principals are explicit; there is no ambient caller. Implementations
/// must apply each transfer completely or not at all.
pub trait AssetLedger: Send + Sync {
    /// Total units in circulation
    fn total_supply(&self) -> Amount;

    /// Balance of one account
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Move `amount` from `from` to `to`
    fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Let `spender` move up to `amount` of `owner`'s balance
    fn approve(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Remaining delegated allowance from `owner` to `spender`
    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Move `amount` from `owner` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// Shared handle to one external ledger
pub type LedgerHandle = Arc<dyn AssetLedger>;

// Re-exports
pub use client::{LedgerClient, TransferJournal};
pub use memory::InMemoryLedger;
