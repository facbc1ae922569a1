//! Protocol-wide constants for the PayChan channel engine.

/// Required length of a channel identifier in bytes.
pub const CHANNEL_ID_LEN: usize = 32;

/// Required length of a recoverable ECDSA signature in bytes (`r || s || v`).
pub const SIGNATURE_LEN: usize = 65;

/// Deposit floor in base units. A deposit or funding amount must be
/// **strictly greater** than this to prevent dust-channel spam.
pub const MIN_DEPOSIT: u64 = 1000;

/// Fixed challenge window for unilateral closes, in ledger height units.
/// A pending proposal becomes final once `height >= deadline`.
pub const CHALLENGE_WINDOW: u64 = 144;

/// Length of the balance-commitment message in bytes:
/// `channel_id (32) || balance_a (8) || balance_b (8)`.
pub const COMMITMENT_MESSAGE_LEN: usize = 48;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "PayChan";
