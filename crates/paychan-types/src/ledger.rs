//! The injected ledger capability.
//!
//! The underlying consensus system provides atomic value transfer, global
//! ordering, and a monotonic height. The engine never touches wall-clock
//! time or global balances directly — it only sees this trait, which keeps
//! the core logic testable against a deterministic fake.

use crate::{ParticipantId, PaychanError, Result};

/// Atomic value transfer and a monotonic height, as provided by the
/// underlying ledger/consensus system.
pub trait Ledger {
    /// Move `amount` base units from `from` to `to`. Atomic: on error,
    /// no value has moved.
    fn transfer(&mut self, amount: u64, from: ParticipantId, to: ParticipantId) -> Result<()>;

    /// The current ledger height. Monotonically non-decreasing.
    fn current_height(&self) -> u64;
}

/// Deterministic in-memory ledger for tests.
///
/// Tracks per-account balances, a settable height, and supports failure
/// injection: transfers **to** a quarantined account are rejected, which
/// is how payout-atomicity tests force the second leg of a dual payout
/// to fail.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct FakeLedger {
    balances: std::collections::HashMap<ParticipantId, u64>,
    height: u64,
    quarantined: std::collections::HashSet<ParticipantId>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl FakeLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air (test setup only).
    pub fn mint(&mut self, account: ParticipantId, amount: u64) {
        *self.balances.entry(account).or_insert(0) += amount;
    }

    #[must_use]
    pub fn balance_of(&self, account: ParticipantId) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    pub fn set_height(&mut self, height: u64) {
        self.height = height;
    }

    pub fn advance(&mut self, blocks: u64) {
        self.height += blocks;
    }

    /// Reject all future transfers **to** this account.
    pub fn quarantine(&mut self, account: ParticipantId) {
        self.quarantined.insert(account);
    }

    pub fn lift_quarantine(&mut self, account: ParticipantId) {
        self.quarantined.remove(&account);
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Ledger for FakeLedger {
    fn transfer(&mut self, amount: u64, from: ParticipantId, to: ParticipantId) -> Result<()> {
        if self.quarantined.contains(&to) {
            return Err(PaychanError::TransferFailed {
                reason: format!("account {to} rejects transfers"),
            });
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(PaychanError::TransferFailed {
                reason: format!("account {from} has {from_balance}, needs {amount}"),
            });
        }
        *self.balances.entry(from).or_insert(0) -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    fn current_height(&self) -> u64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(byte: u8) -> ParticipantId {
        ParticipantId::from_bytes([byte; 20])
    }

    #[test]
    fn transfer_moves_value() {
        let mut ledger = FakeLedger::new();
        ledger.mint(acct(1), 1000);

        ledger.transfer(400, acct(1), acct(2)).unwrap();
        assert_eq!(ledger.balance_of(acct(1)), 600);
        assert_eq!(ledger.balance_of(acct(2)), 400);
    }

    #[test]
    fn transfer_insufficient_fails_atomically() {
        let mut ledger = FakeLedger::new();
        ledger.mint(acct(1), 100);

        let err = ledger.transfer(200, acct(1), acct(2)).unwrap_err();
        assert!(matches!(err, PaychanError::TransferFailed { .. }));
        assert_eq!(ledger.balance_of(acct(1)), 100);
        assert_eq!(ledger.balance_of(acct(2)), 0);
    }

    #[test]
    fn quarantine_rejects_incoming() {
        let mut ledger = FakeLedger::new();
        ledger.mint(acct(1), 1000);
        ledger.quarantine(acct(2));

        assert!(ledger.transfer(100, acct(1), acct(2)).is_err());
        assert_eq!(ledger.balance_of(acct(1)), 1000);

        ledger.lift_quarantine(acct(2));
        assert!(ledger.transfer(100, acct(1), acct(2)).is_ok());
    }

    #[test]
    fn height_is_settable_and_advanceable() {
        let mut ledger = FakeLedger::new();
        assert_eq!(ledger.current_height(), 0);
        ledger.set_height(100);
        assert_eq!(ledger.current_height(), 100);
        ledger.advance(44);
        assert_eq!(ledger.current_height(), 144);
    }

    #[test]
    fn zero_transfer_is_a_no_op() {
        let mut ledger = FakeLedger::new();
        ledger.transfer(0, acct(1), acct(2)).unwrap();
        assert_eq!(ledger.balance_of(acct(1)), 0);
        assert_eq!(ledger.balance_of(acct(2)), 0);
    }
}
