//! Custody transfer client
//!
//! Wraps one ledger handle with the pool's custody account and records every
//! completed transfer so a failing operation can be unwound.

use std::sync::Arc;

use basin_core::{AccountId, Amount, AssetId, LedgerError};

use crate::LedgerHandle;

/// One completed transfer, kept so it can be reversed
struct TransferRecord {
    ledger: LedgerHandle,
    from: AccountId,
    to: AccountId,
    amount: Amount,
}

/// Journal of completed transfers within a single pool operation.
///
/// On success the operation calls [`TransferJournal::commit`]; on any later
/// failure it calls [`TransferJournal::unwind`], which reverses the records
/// newest-first so the ledgers end up exactly where they started.
#[derive(Default)]
pub struct TransferJournal {
    records: Vec<TransferRecord>,
}

impl TransferJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transfers recorded so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&mut self, ledger: LedgerHandle, from: &AccountId, to: &AccountId, amount: Amount) {
        self.records.push(TransferRecord {
            ledger,
            from: from.clone(),
            to: to.clone(),
            amount,
        });
    }

    /// Keep the recorded transfers; the operation succeeded
    pub fn commit(self) {}

    /// Reverse every recorded transfer, newest first.
    ///
    /// A reversal moves funds back along the edge they just travelled, so on
    /// an all-or-nothing ledger it cannot fail; a failure here means the
    /// ledger broke that contract.
    pub fn unwind(mut self) {
        while let Some(entry) = self.records.pop() {
            if let Err(e) = entry.ledger.transfer(&entry.to, &entry.from, entry.amount) {
                tracing::error!(amount = entry.amount, error = %e, "transfer reversal failed");
            }
        }
    }
}

/// Custody client for one traded asset
pub struct LedgerClient {
    ledger: LedgerHandle,
    asset: AssetId,
    custody: AccountId,
}

impl LedgerClient {
    pub fn new(ledger: LedgerHandle, asset: AssetId, custody: AccountId) -> Self {
        Self {
            ledger,
            asset,
            custody,
        }
    }

    /// Asset this client moves
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// Pull `amount` from `from` into pool custody, riding the delegated
    /// allowance `from` granted to the custody account.
    pub fn pull(
        &self,
        from: &AccountId,
        amount: Amount,
        journal: &mut TransferJournal,
    ) -> Result<(), LedgerError> {
        self.ledger
            .transfer_from(&self.custody, from, &self.custody, amount)?;
        journal.record(Arc::clone(&self.ledger), from, &self.custody, amount);
        Ok(())
    }

    /// Push `amount` from pool custody to `to`
    pub fn push(
        &self,
        to: &AccountId,
        amount: Amount,
        journal: &mut TransferJournal,
    ) -> Result<(), LedgerError> {
        self.ledger.transfer(&self.custody, to, amount)?;
        journal.record(Arc::clone(&self.ledger), &self.custody, to, amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetLedger, InMemoryLedger};

    fn setup() -> (Arc<InMemoryLedger>, LedgerClient, AccountId) {
        let ledger = Arc::new(InMemoryLedger::new());
        let custody = AccountId::new("pool-custody");
        let user = AccountId::new("alice");
        ledger.mint(&user, 1_000).unwrap();
        let client = LedgerClient::new(
            Arc::clone(&ledger) as LedgerHandle,
            AssetId::new("token-a"),
            custody,
        );
        (ledger, client, user)
    }

    #[test]
    fn test_pull_requires_allowance() {
        let (_ledger, client, user) = setup();
        let mut journal = TransferJournal::new();
        let err = client.pull(&user, 100, &mut journal).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
        assert!(journal.is_empty());
    }

    #[test]
    fn test_pull_then_push_records_both() {
        let (ledger, client, user) = setup();
        ledger
            .approve(&user, &AccountId::new("pool-custody"), 500)
            .unwrap();

        let mut journal = TransferJournal::new();
        client.pull(&user, 300, &mut journal).unwrap();
        client.push(&user, 100, &mut journal).unwrap();
        assert_eq!(journal.len(), 2);
        assert_eq!(ledger.balance_of(&AccountId::new("pool-custody")), 200);
        journal.commit();
        assert_eq!(ledger.balance_of(&user), 800);
    }

    #[test]
    fn test_unwind_restores_balances() {
        let (ledger, client, user) = setup();
        ledger
            .approve(&user, &AccountId::new("pool-custody"), 500)
            .unwrap();

        let mut journal = TransferJournal::new();
        client.pull(&user, 300, &mut journal).unwrap();
        client.push(&user, 100, &mut journal).unwrap();
        journal.unwind();

        assert_eq!(ledger.balance_of(&user), 1_000);
        assert_eq!(ledger.balance_of(&AccountId::new("pool-custody")), 0);
    }
}
