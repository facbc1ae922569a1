//! Input shape and identity validation.
//!
//! These checks run before any state change and before any cryptography.
//! They are purely structural: a signature that passes [`parse_signature`]
//! has the right length, nothing more.

use paychan_types::{ChannelId, ParticipantId, PaychanError, Result, Signature, constants};

/// Parse a channel identifier, requiring exactly
/// [`constants::CHANNEL_ID_LEN`] bytes.
pub fn parse_channel_id(bytes: &[u8]) -> Result<ChannelId> {
    ChannelId::from_slice(bytes).ok_or_else(|| PaychanError::InvalidInput {
        reason: format!(
            "channel id must be {} bytes, got {}",
            constants::CHANNEL_ID_LEN,
            bytes.len()
        ),
    })
}

/// Parse signature material, requiring exactly
/// [`constants::SIGNATURE_LEN`] bytes (`r || s || v`). Shape only — no
/// cryptographic check.
pub fn parse_signature(bytes: &[u8]) -> Result<Signature> {
    Signature::from_slice(bytes).ok_or_else(|| PaychanError::InvalidInput {
        reason: format!(
            "signature must be {} bytes, got {}",
            constants::SIGNATURE_LEN,
            bytes.len()
        ),
    })
}

/// Enforce the dust floor: a deposit or funding amount must be strictly
/// greater than `min_deposit`.
pub fn check_deposit_floor(amount: u64, min_deposit: u64) -> Result<()> {
    if amount > min_deposit {
        Ok(())
    } else {
        Err(PaychanError::InvalidInput {
            reason: format!("amount {amount} must exceed the deposit floor of {min_deposit}"),
        })
    }
}

/// A channel cannot be opened or funded with oneself.
pub fn check_distinct_parties(caller: ParticipantId, counterparty: ParticipantId) -> Result<()> {
    if caller == counterparty {
        Err(PaychanError::InvalidInput {
            reason: format!("caller {caller} cannot open a channel with themselves"),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_id_exact_length_only() {
        assert!(parse_channel_id(&[0u8; 32]).is_ok());
        for len in [0usize, 16, 31, 33, 64] {
            let err = parse_channel_id(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, PaychanError::InvalidInput { .. }), "len {len}");
        }
    }

    #[test]
    fn signature_exact_length_only() {
        assert!(parse_signature(&[0u8; 65]).is_ok());
        for len in [0usize, 64, 66, 130] {
            let err = parse_signature(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, PaychanError::InvalidInput { .. }), "len {len}");
        }
    }

    #[test]
    fn deposit_floor_is_strict() {
        assert!(check_deposit_floor(1001, 1000).is_ok());
        // Exactly at the floor is rejected.
        assert!(check_deposit_floor(1000, 1000).is_err());
        assert!(check_deposit_floor(999, 1000).is_err());
        assert!(check_deposit_floor(0, 1000).is_err());
    }

    #[test]
    fn self_dealing_rejected() {
        let a = ParticipantId::from_bytes([1u8; 20]);
        let b = ParticipantId::from_bytes([2u8; 20]);
        assert!(check_distinct_parties(a, b).is_ok());
        let err = check_distinct_parties(a, a).unwrap_err();
        assert!(matches!(err, PaychanError::InvalidInput { .. }));
    }
}
