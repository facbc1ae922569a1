//! # Channel — the bilateral escrow record
//!
//! A `Channel` is the ledger of truth for one two-party payment channel:
//! who the parties are, how much is escrowed, and each party's current
//! settlement entitlement.
//!
//! ## Lifecycle
//!
//! ```text
//!   ┌─────────────┐  create   ┌──────┐  initiate_unilateral  ┌───────────┐
//!   │ NonExistent ├──────────▶│ Open ├──────────────────────▶│ Disputing │
//!   └─────────────┘           └──┬───┘                       └─────┬─────┘
//!                                │ cooperative close               │ resolve
//!                                ▼                                 │ (deadline elapsed)
//!                            ┌────────┐                            │
//!                            │ Closed │◀───────────────────────────┘
//!                            └────────┘
//! ```
//!
//! `Disputing` is a sub-state of open, distinguished by a nonzero
//! `dispute_deadline`. Closed channels are never deleted: they remain as
//! zeroed tombstones, which also blocks re-creation of the identical
//! `(id, a, b)` triple.
//!
//! ## Conservation invariant
//!
//! At every committed state, `balance_a + balance_b == total_deposited`
//! while the channel is open (disputing included); once closed, both
//! balances and the total are zero (funds already paid out).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ChannelId, ParticipantId};

/// The full lookup key for a channel: the only index the store supports.
///
/// A participant must know the counterpart to address a channel — there is
/// deliberately no secondary index by id alone or by single participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelKey {
    pub channel_id: ChannelId,
    pub participant_a: ParticipantId,
    pub participant_b: ParticipantId,
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}, {}]",
            self.channel_id,
            self.participant_a.short(),
            self.participant_b.short()
        )
    }
}

/// Observable lifecycle phase, derived from the record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelPhase {
    /// Funded and live; off-ledger updates are being exchanged.
    Open,
    /// A unilateral close proposal is pending its challenge window.
    /// Still open on-ledger.
    Disputing,
    /// Settled and paid out. Terminal.
    Closed,
}

impl fmt::Display for ChannelPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Disputing => write!(f, "DISPUTING"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// The persisted channel record. One per `(channel_id, a, b)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Opaque 32-byte identifier chosen by the opener.
    pub channel_id: ChannelId,
    /// The channel opener. Creation and funding always credit this side.
    pub participant_a: ParticipantId,
    /// The counterparty.
    pub participant_b: ParticipantId,
    /// Sum of all deposits ever locked into this channel. Zeroed on close.
    pub total_deposited: u64,
    /// Participant A's current settlement entitlement.
    pub balance_a: u64,
    /// Participant B's current settlement entitlement.
    pub balance_b: u64,
    /// True from creation until either close path completes.
    pub is_open: bool,
    /// Absolute ledger height after which a pending unilateral proposal
    /// becomes final. Zero when no dispute is pending.
    pub dispute_deadline: u64,
    /// Sequence counter for off-ledger state updates. Carried for
    /// data-format fidelity; no operation currently reads or increments it
    /// (known protocol gap — replay protection is unenforced).
    pub nonce: u64,
}

impl Channel {
    /// A freshly opened channel: the opener's deposit is their entire balance.
    #[must_use]
    pub fn open(
        channel_id: ChannelId,
        participant_a: ParticipantId,
        participant_b: ParticipantId,
        initial_deposit: u64,
    ) -> Self {
        Self {
            channel_id,
            participant_a,
            participant_b,
            total_deposited: initial_deposit,
            balance_a: initial_deposit,
            balance_b: 0,
            is_open: true,
            dispute_deadline: 0,
            nonce: 0,
        }
    }

    /// The store key for this record.
    #[must_use]
    pub fn key(&self) -> ChannelKey {
        ChannelKey {
            channel_id: self.channel_id,
            participant_a: self.participant_a,
            participant_b: self.participant_b,
        }
    }

    /// Derived lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ChannelPhase {
        if !self.is_open {
            ChannelPhase::Closed
        } else if self.dispute_deadline != 0 {
            ChannelPhase::Disputing
        } else {
            ChannelPhase::Open
        }
    }

    /// Whether a unilateral close proposal is pending.
    #[must_use]
    pub fn is_disputing(&self) -> bool {
        self.phase() == ChannelPhase::Disputing
    }

    /// Check the conservation invariant for this record.
    ///
    /// Open (and disputing): `balance_a + balance_b == total_deposited`.
    /// Closed: all three are zero.
    #[must_use]
    pub fn conservation_holds(&self) -> bool {
        if self.is_open {
            self.balance_a
                .checked_add(self.balance_b)
                .is_some_and(|sum| sum == self.total_deposited)
        } else {
            self.total_deposited == 0 && self.balance_a == 0 && self.balance_b == 0
        }
    }

    /// The zeroed tombstone this record becomes once funds are paid out.
    #[must_use]
    pub fn into_closed(mut self) -> Self {
        self.total_deposited = 0;
        self.balance_a = 0;
        self.balance_b = 0;
        self.is_open = false;
        self.dispute_deadline = 0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_channel() -> Channel {
        Channel::open(
            ChannelId::from_bytes([1u8; 32]),
            ParticipantId::from_bytes([0xaa; 20]),
            ParticipantId::from_bytes([0xbb; 20]),
            5000,
        )
    }

    #[test]
    fn open_channel_credits_opener() {
        let ch = make_channel();
        assert_eq!(ch.total_deposited, 5000);
        assert_eq!(ch.balance_a, 5000);
        assert_eq!(ch.balance_b, 0);
        assert!(ch.is_open);
        assert_eq!(ch.dispute_deadline, 0);
        assert_eq!(ch.nonce, 0);
        assert_eq!(ch.phase(), ChannelPhase::Open);
    }

    #[test]
    fn conservation_holds_while_open() {
        let mut ch = make_channel();
        assert!(ch.conservation_holds());

        ch.balance_a = 2000;
        ch.balance_b = 3000;
        assert!(ch.conservation_holds());

        ch.balance_b = 4000;
        assert!(!ch.conservation_holds());
    }

    #[test]
    fn nonzero_deadline_means_disputing() {
        let mut ch = make_channel();
        assert!(!ch.is_disputing());
        ch.dispute_deadline = 250;
        assert_eq!(ch.phase(), ChannelPhase::Disputing);
        assert!(ch.is_disputing());
        // Disputing is a sub-state of open.
        assert!(ch.is_open);
    }

    #[test]
    fn closed_tombstone_is_zeroed() {
        let mut ch = make_channel();
        ch.dispute_deadline = 250;
        let closed = ch.into_closed();
        assert_eq!(closed.phase(), ChannelPhase::Closed);
        assert_eq!(closed.total_deposited, 0);
        assert_eq!(closed.balance_a, 0);
        assert_eq!(closed.balance_b, 0);
        assert_eq!(closed.dispute_deadline, 0);
        assert!(closed.conservation_holds());
    }

    #[test]
    fn closed_with_residual_balance_violates_conservation() {
        let mut ch = make_channel();
        ch.is_open = false;
        // Funds were never zeroed out — must be flagged.
        assert!(!ch.conservation_holds());
    }

    #[test]
    fn key_preserves_triple() {
        let ch = make_channel();
        let key = ch.key();
        assert_eq!(key.channel_id, ch.channel_id);
        assert_eq!(key.participant_a, ch.participant_a);
        assert_eq!(key.participant_b, ch.participant_b);
    }

    #[test]
    fn serde_roundtrip() {
        let ch = make_channel();
        let json = serde_json::to_string(&ch).unwrap();
        let back: Channel = serde_json::from_str(&json).unwrap();
        assert_eq!(ch, back);
    }
}
