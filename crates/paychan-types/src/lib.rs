//! # paychan-types
//!
//! Shared types, errors, and capability traits for the **PayChan** bilateral
//! payment-channel engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ChannelId`], [`ParticipantId`], [`Signature`]
//! - **Channel model**: [`Channel`], [`ChannelKey`], [`ChannelPhase`]
//! - **Capability traits**: [`Ledger`] (value transfer + height),
//!   [`Verifier`] (signature authenticity)
//! - **Configuration**: [`ChannelConfig`]
//! - **Errors**: [`PaychanError`] with `PC_ERR_` prefix codes
//! - **Constants**: protocol-wide limits and defaults
//!
//! With the `test-helpers` feature, deterministic test doubles
//! ([`FakeLedger`], [`AcceptAllVerifier`]) become available for use in
//! downstream test suites.

pub mod channel;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod verifier;

// Re-export all primary types at crate root for ergonomic imports:
//   use paychan_types::{Channel, ChannelId, Ledger, Verifier, ...};

pub use channel::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use verifier::*;

// Constants are accessed via `paychan_types::constants::FOO`
// (not re-exported to avoid name collisions).
