//! Identifiers used throughout PayChan.
//!
//! Channel identifiers are opaque 32-byte values chosen by the channel
//! opener. Participant identities are 20-byte addresses derived from
//! secp256k1 public keys (the derivation lives in `paychan-auth`, which
//! owns the crypto dependencies — this crate only holds bytes).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ChannelId
// ---------------------------------------------------------------------------

/// Opaque 32-byte channel identifier, chosen by the channel opener.
///
/// Unique per `(participant_a, participant_b)` pair; the full triple is the
/// only lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ChannelId(pub [u8; 32]);

impl ChannelId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a byte slice. Returns `None` unless exactly 32 bytes.
    ///
    /// Shape rejection with a typed error is the authorization module's job;
    /// this is the lossless constructor underneath it.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chan:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// ParticipantId
// ---------------------------------------------------------------------------

/// A participant identity: a 20-byte address.
///
/// Derived as the low 20 bytes of Keccak-256 over the uncompressed
/// secp256k1 public key (see `paychan_auth::participant_from_key`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ParticipantId(pub [u8; 20]);

impl ParticipantId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 65-byte recoverable ECDSA signature: `r || s || v`, with
/// `v = 27 + recovery_id` (Ethereum convention).
///
/// Not serialized — signatures are transient operation inputs, never part
/// of the persisted channel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 65]);

impl Signature {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    /// Parse from a byte slice. Returns `None` unless exactly 65 bytes.
    /// Shape only — no cryptographic validation.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 65] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The `r || s` component (64 bytes).
    #[must_use]
    pub fn rs(&self) -> &[u8] {
        &self.0[..64]
    }

    /// The recovery byte `v`.
    #[must_use]
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sig:{}…", hex::encode(&self.0[..6]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
