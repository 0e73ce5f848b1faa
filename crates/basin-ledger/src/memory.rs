//! In-memory reference ledger
//!
//! Balance and allowance bookkeeping with the same all-or-nothing transfer
//! semantics the pool expects from any production ledger.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use basin_core::{AccountId, Amount, LedgerError};

use crate::AssetLedger;

#[derive(Default)]
struct Books {
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<AccountId, HashMap<AccountId, Amount>>,
    total_supply: Amount,
}

impl Books {
    fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn granted(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(0)
    }

    fn move_units(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: from_balance,
            });
        }
        if from == to {
            // Self-transfer: balance check above, then nothing moves
            return Ok(());
        }
        let to_next = self
            .balance(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(from.clone(), from_balance - amount);
        self.balances.insert(to.clone(), to_next);
        Ok(())
    }
}

/// In-memory fungible-asset ledger
#[derive(Default)]
pub struct InMemoryLedger {
    books: Mutex<Books>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit freshly issued units to an account
    pub fn mint(&self, account: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let mut books = self.lock();
        let next_balance = books
            .balance(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let next_supply = books
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        books.balances.insert(account.clone(), next_balance);
        books.total_supply = next_supply;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Books> {
        self.books.lock().expect("ledger books lock poisoned")
    }
}

impl AssetLedger for InMemoryLedger {
    fn total_supply(&self) -> Amount {
        self.lock().total_supply
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.lock().balance(account)
    }

    fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.lock().move_units(from, to, amount)
    }

    fn approve(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.lock()
            .allowances
            .entry(owner.clone())
            .or_default()
            .insert(spender.clone(), amount);
        Ok(())
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.lock().granted(owner, spender)
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut books = self.lock();
        let granted = books.granted(owner, spender);
        if granted < amount {
            return Err(LedgerError::InsufficientAllowance {
                required: amount,
                available: granted,
            });
        }
        books.move_units(owner, to, amount)?;
        books
            .allowances
            .entry(owner.clone())
            .or_default()
            .insert(spender.clone(), granted - amount);
        Ok(())
    }
}
