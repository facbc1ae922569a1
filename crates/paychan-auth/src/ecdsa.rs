//! Recoverable secp256k1 ECDSA verification.
//!
//! The message is digested with Keccak-256, the verifying key is recovered
//! from the 65-byte `r || s || v` signature, and the key's derived address
//! is compared with the claimed signer. The signature itself names no
//! identity; recovery is what binds it to one.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use sha3::{Digest, Keccak256};

use paychan_types::{ParticipantId, Signature, Verifier};

/// Derive a participant identity from a verifying key: the low 20 bytes of
/// Keccak-256 over the uncompressed public key (SEC1 point minus its
/// leading format byte).
#[must_use]
pub fn participant_from_key(key: &VerifyingKey) -> ParticipantId {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 format byte; it is encoding, not key material.
    let hash: [u8; 32] = Keccak256::digest(&point.as_bytes()[1..]).into();
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    ParticipantId::from_bytes(addr)
}

/// Keccak-256 digest of a commitment message, the prehash that gets signed.
#[must_use]
pub fn message_digest(message: &[u8]) -> [u8; 32] {
    Keccak256::digest(message).into()
}

/// Production [`Verifier`]: secp256k1 public-key recovery.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaVerifier;

impl EcdsaVerifier {
    fn recover(message: &[u8], signature: &Signature) -> Option<ParticipantId> {
        let digest = message_digest(message);
        let recovery_id = RecoveryId::from_byte(signature.v().checked_sub(27)?)?;
        let sig = EcdsaSignature::from_slice(signature.rs()).ok()?;
        let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id).ok()?;
        Some(participant_from_key(&key))
    }
}

impl Verifier for EcdsaVerifier {
    fn verify(&self, message: &[u8], signature: &Signature, claimed_signer: ParticipantId) -> bool {
        Self::recover(message, signature) == Some(claimed_signer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::commitment_message;
    use crate::signer::ChannelSigner;
    use paychan_types::ChannelId;

    #[test]
    fn valid_signature_verifies() {
        let signer = ChannelSigner::random();
        let id = ChannelId::from_bytes([1u8; 32]);
        let message = commitment_message(&id, 2000, 4000);
        let sig = signer.sign(&message);

        assert!(EcdsaVerifier.verify(&message, &sig, signer.id()));
    }

    #[test]
    fn wrong_claimed_signer_rejected() {
        let signer = ChannelSigner::random();
        let other = ChannelSigner::random();
        let message = commitment_message(&ChannelId::from_bytes([1u8; 32]), 2000, 4000);
        let sig = signer.sign(&message);

        assert!(!EcdsaVerifier.verify(&message, &sig, other.id()));
    }

    #[test]
    fn tampered_message_rejected() {
        let signer = ChannelSigner::random();
        let id = ChannelId::from_bytes([1u8; 32]);
        let sig = signer.sign(&commitment_message(&id, 2000, 4000));

        // Signer later claims a different split.
        let tampered = commitment_message(&id, 4000, 2000);
        assert!(!EcdsaVerifier.verify(&tampered, &sig, signer.id()));
    }

    #[test]
    fn garbage_recovery_byte_rejected() {
        let signer = ChannelSigner::random();
        let message = commitment_message(&ChannelId::from_bytes([1u8; 32]), 2000, 4000);
        let mut sig = signer.sign(&message);

        sig.0[64] = 0; // below the +27 convention
        assert!(!EcdsaVerifier.verify(&message, &sig, signer.id()));
        sig.0[64] = 99;
        assert!(!EcdsaVerifier.verify(&message, &sig, signer.id()));
    }

    #[test]
    fn all_zero_signature_rejected() {
        let signer = ChannelSigner::random();
        let message = commitment_message(&ChannelId::from_bytes([1u8; 32]), 2000, 4000);
        let sig = Signature::from_bytes([0u8; 65]);
        assert!(!EcdsaVerifier.verify(&message, &sig, signer.id()));
    }

    #[test]
    fn address_derivation_is_stable() {
        let signer = ChannelSigner::random();
        assert_eq!(
            participant_from_key(signer.verifying_key()),
            participant_from_key(signer.verifying_key())
        );
        assert_eq!(signer.id(), participant_from_key(signer.verifying_key()));
    }
}
