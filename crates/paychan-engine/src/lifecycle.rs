//! The channel lifecycle state machine.
//!
//! States: `NonExistent → Open → (Disputing) → Closed`, where `Disputing`
//! is the open sub-state with a nonzero dispute deadline. Each operation
//! runs its checks in a fixed order; the first failing check aborts with no
//! state change. The store is only written after every check has passed and
//! every required value transfer has succeeded.

use paychan_auth::{
    check_deposit_floor, check_distinct_parties, commitment_message, parse_channel_id,
    parse_signature,
};
use paychan_store::ChannelStore;
use paychan_types::{
    Channel, ChannelConfig, ChannelId, ChannelKey, Ledger, ParticipantId, PaychanError, Result,
    Verifier,
};

/// The lifecycle engine, parameterized over its injected collaborators.
///
/// Holds no protocol state of its own: every transition is a function of
/// (current channel, operation, caller identity, ledger height). Escrowed
/// value lives under the `custody` account on the ledger.
pub struct ChannelEngine<L: Ledger, V: Verifier> {
    store: ChannelStore,
    ledger: L,
    verifier: V,
    config: ChannelConfig,
    custody: ParticipantId,
    owner: ParticipantId,
}

impl<L: Ledger, V: Verifier> ChannelEngine<L, V> {
    #[must_use]
    pub fn new(
        ledger: L,
        verifier: V,
        config: ChannelConfig,
        custody: ParticipantId,
        owner: ParticipantId,
    ) -> Self {
        Self {
            store: ChannelStore::new(),
            ledger,
            verifier,
            config,
            custody,
            owner,
        }
    }

    /// Open a new channel: lock `initial_deposit` from the caller into
    /// custody and write the record with the entire balance on the
    /// caller's side.
    ///
    /// # Errors
    /// - `InvalidInput`: bad id shape, deposit at or below the floor,
    ///   or `participant_b` is the caller
    /// - `ChannelExists`: the exact triple already has a record
    ///   (closed tombstones included — triples are never reused)
    /// - `TransferFailed`: the ledger rejected the deposit lock
    pub fn create_channel(
        &mut self,
        caller: ParticipantId,
        channel_id: &[u8],
        participant_b: ParticipantId,
        initial_deposit: u64,
    ) -> Result<()> {
        let id = parse_channel_id(channel_id)?;
        check_deposit_floor(initial_deposit, self.config.min_deposit)?;
        check_distinct_parties(caller, participant_b)?;

        let key = ChannelKey {
            channel_id: id,
            participant_a: caller,
            participant_b,
        };
        if self.store.contains(&key) {
            return Err(PaychanError::ChannelExists);
        }

        self.ledger.transfer(initial_deposit, caller, self.custody)?;

        let channel = Channel::open(id, caller, participant_b, initial_deposit);
        tracing::info!(channel = %key, deposit = initial_deposit, "channel created");
        self.store.put(channel);
        Ok(())
    }

    /// Lock additional funds from the caller into an open channel.
    ///
    /// Funding always credits the caller's own balance; there is no
    /// operation to fund the counterparty's side directly (asymmetric by
    /// design).
    ///
    /// # Errors
    /// - `InvalidInput`, `ChannelNotFound`, `ChannelClosed`
    /// - `BalanceOverflow`: the new total would exceed the representable range
    /// - `TransferFailed`: the ledger rejected the lock
    pub fn fund_channel(
        &mut self,
        caller: ParticipantId,
        channel_id: &[u8],
        participant_b: ParticipantId,
        amount: u64,
    ) -> Result<()> {
        let id = parse_channel_id(channel_id)?;
        check_deposit_floor(amount, self.config.min_deposit)?;
        check_distinct_parties(caller, participant_b)?;

        let mut channel = self.lookup_open(id, caller, participant_b)?.clone();

        let new_total = channel
            .total_deposited
            .checked_add(amount)
            .ok_or(PaychanError::BalanceOverflow)?;
        let new_balance_a = channel
            .balance_a
            .checked_add(amount)
            .ok_or(PaychanError::BalanceOverflow)?;

        self.ledger.transfer(amount, caller, self.custody)?;

        channel.total_deposited = new_total;
        channel.balance_a = new_balance_a;
        tracing::debug!(channel = %channel.key(), amount, total = new_total, "channel funded");
        self.store.put(channel);
        Ok(())
    }

    /// Cooperative close: both parties have signed the final balance split,
    /// so settle immediately. Pays `balance_a` to the caller and
    /// `balance_b` to the counterparty atomically — both transfers succeed
    /// or neither does — then zeroes the record.
    ///
    /// # Errors
    /// - `InvalidInput`, `ChannelNotFound`, `ChannelClosed`
    /// - `InvalidSignature`: either signature fails against its party
    /// - `InsufficientFunds`: the split does not sum to the total deposited
    /// - `TransferFailed`: a payout leg was rejected (state unchanged)
    #[allow(clippy::too_many_arguments)]
    pub fn close_cooperative(
        &mut self,
        caller: ParticipantId,
        channel_id: &[u8],
        participant_b: ParticipantId,
        balance_a: u64,
        balance_b: u64,
        sig_a: &[u8],
        sig_b: &[u8],
    ) -> Result<()> {
        let id = parse_channel_id(channel_id)?;
        let sig_a = parse_signature(sig_a)?;
        let sig_b = parse_signature(sig_b)?;
        check_distinct_parties(caller, participant_b)?;

        let channel = self.lookup_open(id, caller, participant_b)?.clone();

        let message = commitment_message(&id, balance_a, balance_b);
        if !self.verifier.verify(&message, &sig_a, caller) {
            return Err(PaychanError::InvalidSignature { signer: caller });
        }
        if !self.verifier.verify(&message, &sig_b, participant_b) {
            return Err(PaychanError::InvalidSignature {
                signer: participant_b,
            });
        }

        self.check_conservation(&channel, balance_a, balance_b)?;

        self.pay_out(balance_a, caller, balance_b, participant_b)?;

        tracing::info!(
            channel = %channel.key(),
            balance_a,
            balance_b,
            "channel closed cooperatively"
        );
        self.store.put(channel.into_closed());
        Ok(())
    }

    /// Unilateral close, step one: the caller proposes a final split,
    /// signed only by themselves. The proposal is locked into the record
    /// and a dispute deadline set; no funds move until
    /// [`resolve_unilateral_close`](Self::resolve_unilateral_close) after
    /// the challenge window.
    ///
    /// There is no counter-proposal operation: contesting a bad-faith
    /// proposal within the window is an out-of-band remedy (known protocol
    /// gap).
    ///
    /// # Errors
    /// - `InvalidInput`, `ChannelNotFound`, `ChannelClosed`
    /// - `InvalidSignature`: the proposal is not signed by the caller
    /// - `InsufficientFunds`: the split does not sum to the total deposited
    /// - `BalanceOverflow`: the split sum or the computed deadline would
    ///   exceed the representable range
    pub fn initiate_unilateral_close(
        &mut self,
        caller: ParticipantId,
        channel_id: &[u8],
        participant_b: ParticipantId,
        proposed_balance_a: u64,
        proposed_balance_b: u64,
        signature: &[u8],
    ) -> Result<()> {
        let id = parse_channel_id(channel_id)?;
        let signature = parse_signature(signature)?;

        let mut channel = self.lookup_open(id, caller, participant_b)?.clone();

        let message = commitment_message(&id, proposed_balance_a, proposed_balance_b);
        if !self.verifier.verify(&message, &signature, caller) {
            return Err(PaychanError::InvalidSignature { signer: caller });
        }

        self.check_conservation(&channel, proposed_balance_a, proposed_balance_b)?;

        let deadline = self
            .ledger
            .current_height()
            .checked_add(self.config.challenge_window)
            .ok_or(PaychanError::BalanceOverflow)?;
        channel.balance_a = proposed_balance_a;
        channel.balance_b = proposed_balance_b;
        channel.dispute_deadline = deadline;
        tracing::info!(
            channel = %channel.key(),
            proposed_balance_a,
            proposed_balance_b,
            deadline,
            "unilateral close initiated"
        );
        self.store.put(channel);
        Ok(())
    }

    /// Unilateral close, step two: once the challenge window has elapsed,
    /// pay out the stored proposal verbatim and close the channel.
    ///
    /// There is no re-validation against any earlier cooperative state —
    /// whatever split was proposed is what settles.
    ///
    /// # Errors
    /// - `InvalidInput`, `ChannelNotFound`, `ChannelClosed`
    /// - `NoPendingClose`: no unilateral proposal is pending
    /// - `DisputePeriodNotElapsed`: current height is below the deadline
    /// - `TransferFailed`: a payout leg was rejected (state unchanged)
    pub fn resolve_unilateral_close(
        &mut self,
        caller: ParticipantId,
        channel_id: &[u8],
        participant_b: ParticipantId,
    ) -> Result<()> {
        let id = parse_channel_id(channel_id)?;
        check_distinct_parties(caller, participant_b)?;

        let channel = self.lookup_open(id, caller, participant_b)?.clone();

        if channel.dispute_deadline == 0 {
            return Err(PaychanError::NoPendingClose);
        }
        let height = self.ledger.current_height();
        if height < channel.dispute_deadline {
            return Err(PaychanError::DisputePeriodNotElapsed {
                deadline: channel.dispute_deadline,
                height,
            });
        }

        self.pay_out(
            channel.balance_a,
            channel.participant_a,
            channel.balance_b,
            channel.participant_b,
        )?;

        tracing::info!(
            channel = %channel.key(),
            balance_a = channel.balance_a,
            balance_b = channel.balance_b,
            height,
            "unilateral close resolved"
        );
        self.store.put(channel.into_closed());
        Ok(())
    }

    /// Read-only channel lookup. Bypasses authorization — balances are
    /// public. Returns the record even for closed channels (the zeroed
    /// tombstone); `None` for unknown keys or a malformed id.
    #[must_use]
    pub fn channel_info(
        &self,
        channel_id: &[u8],
        participant_a: ParticipantId,
        participant_b: ParticipantId,
    ) -> Option<&Channel> {
        let key = ChannelKey {
            channel_id: ChannelId::from_slice(channel_id)?,
            participant_a,
            participant_b,
        };
        self.store.get(&key)
    }

    /// Audit the conservation invariant across every record: open channels
    /// must balance exactly, tombstones must be zeroed, and custody must be
    /// backing the escrowed total.
    ///
    /// # Errors
    /// Returns `Internal` naming the offending channel.
    pub fn audit_conservation(&self) -> Result<()> {
        for channel in self.store.channels() {
            if !channel.conservation_holds() {
                return Err(PaychanError::Internal(format!(
                    "conservation violated on {}: {} + {} != {} (open={})",
                    channel.key(),
                    channel.balance_a,
                    channel.balance_b,
                    channel.total_deposited,
                    channel.is_open,
                )));
            }
        }
        Ok(())
    }

    /// The channel store (read access).
    #[must_use]
    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    /// The injected ledger.
    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access, for advancing the height between operations.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    #[must_use]
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// The custody account escrowed funds are held under.
    #[must_use]
    pub fn custody(&self) -> ParticipantId {
        self.custody
    }

    /// The deploying identity. Only privileged administrative operations
    /// key off this.
    #[must_use]
    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    #[cfg(feature = "emergency-withdraw")]
    pub(crate) fn store_custodied_total(&self) -> u64 {
        self.store.custodied_total()
    }

    #[cfg(feature = "emergency-withdraw")]
    pub(crate) fn ledger_transfer(
        &mut self,
        amount: u64,
        from: ParticipantId,
        to: ParticipantId,
    ) -> Result<()> {
        self.ledger.transfer(amount, from, to)
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Fetch the channel for `(id, caller-as-a, participant_b)`, requiring
    /// it to exist and still be open.
    fn lookup_open(
        &self,
        channel_id: ChannelId,
        participant_a: ParticipantId,
        participant_b: ParticipantId,
    ) -> Result<&Channel> {
        let key = ChannelKey {
            channel_id,
            participant_a,
            participant_b,
        };
        let channel = self.store.get(&key).ok_or(PaychanError::ChannelNotFound)?;
        if !channel.is_open {
            return Err(PaychanError::ChannelClosed);
        }
        Ok(channel)
    }

    /// No value may be created or destroyed: a proposed split must sum to
    /// the total deposited exactly.
    fn check_conservation(&self, channel: &Channel, balance_a: u64, balance_b: u64) -> Result<()> {
        let proposed = balance_a
            .checked_add(balance_b)
            .ok_or(PaychanError::BalanceOverflow)?;
        if proposed != channel.total_deposited {
            return Err(PaychanError::InsufficientFunds {
                total_deposited: channel.total_deposited,
                proposed,
            });
        }
        Ok(())
    }

    /// Pay both sides out of custody, all-or-nothing.
    ///
    /// The ledger interface offers single transfers only, so the pair is
    /// made atomic by compensation: if the second leg fails, the first is
    /// returned to custody before the error surfaces. A failing refund
    /// means the ledger broke its own accounting and is unrecoverable.
    fn pay_out(
        &mut self,
        amount_a: u64,
        to_a: ParticipantId,
        amount_b: u64,
        to_b: ParticipantId,
    ) -> Result<()> {
        if amount_a > 0 {
            self.ledger.transfer(amount_a, self.custody, to_a)?;
        }
        if amount_b > 0 {
            if let Err(err) = self.ledger.transfer(amount_b, self.custody, to_b) {
                if amount_a > 0 {
                    self.ledger
                        .transfer(amount_a, to_a, self.custody)
                        .map_err(|refund_err| {
                            PaychanError::Internal(format!(
                                "refund of {amount_a} to custody failed ({refund_err}) \
                                 after payout failure ({err})"
                            ))
                        })?;
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
