//! Test signer producing valid recoverable signatures.
//!
//! Key generation and custody are out of scope for the engine; this exists
//! so tests can exercise the real verification path end to end.

use k256::ecdsa::{SigningKey, VerifyingKey};

use paychan_types::{ParticipantId, Signature};

use crate::ecdsa::{message_digest, participant_from_key};

/// A participant with a secp256k1 keypair, able to sign balance commitments.
#[derive(Debug, Clone)]
pub struct ChannelSigner {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
    id: ParticipantId,
}

impl ChannelSigner {
    /// Generate a fresh random keypair.
    #[must_use]
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::rngs::OsRng))
    }

    #[must_use]
    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = *signing_key.verifying_key();
        let id = participant_from_key(&verifying_key);
        Self {
            signing_key,
            verifying_key,
            id,
        }
    }

    /// This signer's participant identity (derived address).
    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[must_use]
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Sign a message, producing the 65-byte `r || s || v` form the
    /// verifier expects.
    ///
    /// # Panics
    /// Panics on signing failure, which for a valid key cannot happen;
    /// this is test tooling.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        let digest = message_digest(message);
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&digest)
            .expect("signing with a valid key");

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&sig.to_bytes());
        bytes[64] = 27 + recovery_id.to_byte();
        Signature::from_bytes(bytes)
    }
}
