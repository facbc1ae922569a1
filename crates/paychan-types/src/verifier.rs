//! The injected signature-verification capability.
//!
//! The engine delegates authenticity to this trait; the real secp256k1
//! implementation lives in `paychan-auth`. Shape checks (signature byte
//! length) happen before verification and are not this trait's concern.

use crate::{ParticipantId, Signature};

/// Checks that `signature` is a valid signature by `claimed_signer` over
/// `message`. Returns `false` on any failure — malformed recovery byte,
/// recovery failure, or signer mismatch — never an error.
pub trait Verifier {
    fn verify(&self, message: &[u8], signature: &Signature, claimed_signer: ParticipantId) -> bool;
}

/// Verifier that accepts everything. For unit tests that exercise the
/// lifecycle state machine without real key material.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllVerifier;

#[cfg(any(test, feature = "test-helpers"))]
impl Verifier for AcceptAllVerifier {
    fn verify(&self, _message: &[u8], _signature: &Signature, _signer: ParticipantId) -> bool {
        true
    }
}

/// Verifier that rejects everything. For tests of the rejection paths.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectAllVerifier;

#[cfg(any(test, feature = "test-helpers"))]
impl Verifier for RejectAllVerifier {
    fn verify(&self, _message: &[u8], _signature: &Signature, _signer: ParticipantId) -> bool {
        false
    }
}
