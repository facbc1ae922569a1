//! # paychan-auth
//!
//! **Authorization Module**: the hard gate in front of the lifecycle
//! engine. Every mutating operation passes through here before any state
//! change:
//!
//! 1. **Shape checks** ([`validate`]): channel-id length, signature length,
//!    deposit floor, no self-dealing — all fail `InvalidInput`.
//! 2. **Commitment encoding** ([`commitment`]): the canonical
//!    `channel_id || balance_a || balance_b` message both parties sign.
//! 3. **Signature verification** ([`ecdsa`]): genuine secp256k1 recoverable
//!    ECDSA — the verifying key is recovered from the 65-byte signature and
//!    its derived address compared with the claimed signer.
//!
//! Read access bypasses this module entirely; balances are public.

pub mod commitment;
pub mod ecdsa;
pub mod validate;

#[cfg(any(test, feature = "test-helpers"))]
pub mod signer;

pub use commitment::commitment_message;
pub use ecdsa::{EcdsaVerifier, participant_from_key};
pub use validate::{
    check_deposit_floor, check_distinct_parties, parse_channel_id, parse_signature,
};

#[cfg(any(test, feature = "test-helpers"))]
pub use signer::ChannelSigner;
