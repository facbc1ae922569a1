//! Error types for the PayChan channel engine.
//!
//! All errors use the `PC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Input validation errors
//! - 2xx: Channel lifecycle errors
//! - 3xx: Funds / signature errors
//! - 4xx: Dispute errors
//! - 5xx: Administrative errors
//! - 6xx: Ledger errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::ParticipantId;

/// Central error enum for all PayChan operations.
///
/// Every mutating operation is all-or-nothing: a returned error guarantees
/// the channel store and all ledger balances are untouched.
#[derive(Debug, Error)]
pub enum PaychanError {
    // =================================================================
    // Input Validation Errors (1xx)
    // =================================================================
    /// The input failed shape or identity validation (bad id length,
    /// deposit below the floor, self-dealing, malformed signature bytes).
    #[error("PC_ERR_100: Invalid input: {reason}")]
    InvalidInput { reason: String },

    // =================================================================
    // Channel Lifecycle Errors (2xx)
    // =================================================================
    /// No channel exists for the given (id, participant_a, participant_b) triple.
    #[error("PC_ERR_200: Channel not found")]
    ChannelNotFound,

    /// A channel with this exact (id, participant_a, participant_b) triple
    /// already exists (open or closed — tombstones block reuse).
    #[error("PC_ERR_201: Channel already exists")]
    ChannelExists,

    /// The channel has already been closed; only read-only queries remain valid.
    #[error("PC_ERR_202: Channel is closed")]
    ChannelClosed,

    // =================================================================
    // Funds / Signature Errors (3xx)
    // =================================================================
    /// The proposed balance split does not sum to the total deposited —
    /// value would be created or destroyed.
    #[error(
        "PC_ERR_300: Balance split violates conservation: proposed sum {proposed} != total deposited {total_deposited}"
    )]
    InsufficientFunds { total_deposited: u64, proposed: u64 },

    /// Checked arithmetic overflowed; amounts must never wrap or saturate.
    #[error("PC_ERR_301: Balance arithmetic overflow")]
    BalanceOverflow,

    /// A signature did not verify against the claimed signer.
    #[error("PC_ERR_302: Signature verification failed for {signer}")]
    InvalidSignature { signer: ParticipantId },

    // =================================================================
    // Dispute Errors (4xx)
    // =================================================================
    /// The challenge window has not elapsed; the proposal is not yet final.
    #[error(
        "PC_ERR_400: Dispute period not elapsed: deadline at height {deadline}, current height {height}"
    )]
    DisputePeriodNotElapsed { deadline: u64, height: u64 },

    /// No unilateral close proposal is pending on this channel.
    #[error("PC_ERR_401: No unilateral close pending")]
    NoPendingClose,

    // =================================================================
    // Administrative Errors (5xx)
    // =================================================================
    /// The caller is not authorized for this privileged operation.
    #[error("PC_ERR_500: Not authorized")]
    NotAuthorized,

    // =================================================================
    // Ledger Errors (6xx)
    // =================================================================
    /// The ledger rejected a value transfer.
    #[error("PC_ERR_600: Ledger transfer failed: {reason}")]
    TransferFailed { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error (e.g., the ledger broke its own
    /// accounting during a compensating refund).
    #[error("PC_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PaychanError>;
