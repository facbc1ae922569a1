//! # paychan-store
//!
//! **Channel Store**: the ledger of truth for every channel record.
//!
//! A mapping keyed by the full `(channel_id, participant_a, participant_b)`
//! triple to at most one [`Channel`](paychan_types::Channel) record. There
//! are no partial updates: every mutation reads the current record,
//! computes the complete next record, and writes it back — each transition
//! is auditable as an old-state → new-state pair.

pub mod store;

pub use store::ChannelStore;
