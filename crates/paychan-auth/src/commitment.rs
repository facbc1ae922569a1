//! The canonical balance-commitment message.
//!
//! Both parties sign this exact byte sequence when committing to a balance
//! split. Signer and verifier must agree byte-for-byte or signatures
//! silently fail to validate, so the encoding is fixed: big-endian u64,
//! no framing, no prefix.

use paychan_types::{ChannelId, constants};

/// Canonical signing payload for a balance commitment.
///
/// Format: `channel_id (32) || balance_a as be64 (8) || balance_b as be64 (8)`.
#[must_use]
pub fn commitment_message(
    channel_id: &ChannelId,
    balance_a: u64,
    balance_b: u64,
) -> [u8; constants::COMMITMENT_MESSAGE_LEN] {
    let mut message = [0u8; constants::COMMITMENT_MESSAGE_LEN];
    message[..32].copy_from_slice(channel_id.as_bytes());
    message[32..40].copy_from_slice(&balance_a.to_be_bytes());
    message[40..48].copy_from_slice(&balance_b.to_be_bytes());
    message
}
