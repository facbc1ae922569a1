//! # paychan-engine
//!
//! **Channel Lifecycle Engine**: the state machine governing channel
//! creation, funding, cooperative close, unilateral close initiation, and
//! dispute resolution.
//!
//! ## Architecture
//!
//! Every public operation enters through the authorization module
//! (`paychan-auth`), which validates shape and identity constraints; the
//! engine then computes the new state against the channel store
//! (`paychan-store`), which persists it. Read access bypasses
//! authorization — balances are public.
//!
//! ```text
//! caller → paychan-auth (shape/identity) → ChannelEngine (invariants)
//!        → ChannelStore (persist) + Ledger (value transfer)
//! ```
//!
//! The engine holds no state of its own beyond its collaborators: each
//! operation is a pure function of (current channel, operation, caller,
//! ledger height) → (next channel, value transfers). Checks run in a fixed
//! order and the first failure aborts with zero side effects.
//!
//! Operations take `&mut self`, so the borrow checker enforces the serial
//! execution model the protocol assumes: transitions against the store are
//! totally ordered, and a racing caller observes stale-state errors
//! (`ChannelExists`, `ChannelNotFound`, `ChannelClosed`) rather than
//! corruption. Wrapping the engine in a per-instance lock preserves this
//! under concurrency.
//!
//! ## Known protocol gaps
//!
//! - No dispute-challenge operation exists: a pending unilateral proposal
//!   cannot be overridden by a newer mutually-signed state before the
//!   deadline. Contesting a bad-faith proposal is an out-of-band remedy.
//! - The per-channel `nonce` is carried but never enforced; stale-state
//!   replay protection is not implemented.

pub mod lifecycle;

#[cfg(feature = "emergency-withdraw")]
pub mod admin;

pub use lifecycle::ChannelEngine;
