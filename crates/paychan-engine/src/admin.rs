//! Emergency withdrawal — the administrative escape hatch.
//!
//! A single privileged operation that sweeps the entire custodied balance
//! to the deploying identity, with no channel scoping and no time lock.
//! This is a centralization trapdoor that breaks the non-custodial claim
//! if ever exercised. It is therefore kept out of the normal channel API:
//! this module only compiles under the `emergency-withdraw` cargo feature,
//! which is off by default.

use paychan_types::{Ledger, ParticipantId, PaychanError, Result, Verifier};

use crate::lifecycle::ChannelEngine;

impl<L: Ledger, V: Verifier> ChannelEngine<L, V> {
    /// Sweep every base unit currently escrowed across all open channels
    /// from custody to the owner. Returns the amount swept.
    ///
    /// Channel records are deliberately left untouched: after a sweep they
    /// still claim balances that custody no longer backs. That is the
    /// nature of the trapdoor, and it is why every use is logged at WARN.
    ///
    /// # Errors
    /// - `NotAuthorized`: the caller is not the deploying identity
    /// - `TransferFailed`: the ledger rejected the sweep
    pub fn emergency_withdraw(&mut self, caller: ParticipantId) -> Result<u64> {
        if caller != self.owner() {
            return Err(PaychanError::NotAuthorized);
        }

        let total = self.store_custodied_total();
        if total > 0 {
            let custody = self.custody();
            let owner = self.owner();
            self.ledger_transfer(total, custody, owner)?;
        }
        tracing::warn!(
            amount = total,
            open_channels = self.store().open_count(),
            "EMERGENCY WITHDRAW: custodied funds swept to owner"
        );
        Ok(total)
    }
}
