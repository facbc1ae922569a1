//! Configuration for the channel lifecycle engine.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunable policy for a channel engine deployment.
///
/// Defaults come from [`constants`] and match the reference protocol;
/// deployments may tighten the deposit floor or lengthen the challenge
/// window, but the semantics of each knob are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Deposit floor in base units. Deposits and funding amounts must be
    /// strictly greater than this.
    pub min_deposit: u64,
    /// Challenge window for unilateral closes, in ledger height units.
    pub challenge_window: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            min_deposit: constants::MIN_DEPOSIT,
            challenge_window: constants::CHALLENGE_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = ChannelConfig::default();
        assert_eq!(cfg.min_deposit, 1000);
        assert_eq!(cfg.challenge_window, 144);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = ChannelConfig {
            min_deposit: 5000,
            challenge_window: 288,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ChannelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
