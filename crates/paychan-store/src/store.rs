//! Keyed channel state with full-record upsert semantics.

use std::collections::HashMap;

use paychan_types::{Channel, ChannelKey};

/// Durable keyed state for every channel.
///
/// Lookup is by the full triple only; there is no secondary index by id
/// alone or by single participant (a participant must know the counterpart
/// to address a channel). Records are never physically deleted: closed
/// channels remain as zeroed tombstones, which also blocks re-creation of
/// the identical triple.
#[derive(Debug, Default)]
pub struct ChannelStore {
    channels: HashMap<ChannelKey, Channel>,
}

impl ChannelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a channel by its full key.
    #[must_use]
    pub fn get(&self, key: &ChannelKey) -> Option<&Channel> {
        self.channels.get(key)
    }

    /// Upsert: replace the entire record under its own key.
    ///
    /// No partial updates exist — callers read, compute the full next
    /// record, and put it back.
    pub fn put(&mut self, channel: Channel) {
        let key = channel.key();
        tracing::debug!(channel = %key, phase = %channel.phase(), "store put");
        self.channels.insert(key, channel);
    }

    /// Whether any record (open or tombstone) exists under this key.
    #[must_use]
    pub fn contains(&self, key: &ChannelKey) -> bool {
        self.channels.contains_key(key)
    }

    /// Total value currently escrowed across all open channels.
    ///
    /// This is the amount the custody account must be backing; it feeds
    /// the emergency sweep and conservation audits.
    #[must_use]
    pub fn custodied_total(&self) -> u64 {
        self.channels
            .values()
            .filter(|ch| ch.is_open)
            .map(|ch| ch.total_deposited)
            .sum()
    }

    /// Iterate over all records, tombstones included.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Number of records tracked (tombstones included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of currently open channels (disputing included).
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.channels.values().filter(|ch| ch.is_open).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paychan_types::{ChannelId, ParticipantId};

    fn make_channel(id_byte: u8, deposit: u64) -> Channel {
        Channel::open(
            ChannelId::from_bytes([id_byte; 32]),
            ParticipantId::from_bytes([0xaa; 20]),
            ParticipantId::from_bytes([0xbb; 20]),
            deposit,
        )
    }

    #[test]
    fn put_then_get() {
        let mut store = ChannelStore::new();
        let ch = make_channel(1, 5000);
        let key = ch.key();

        assert!(store.get(&key).is_none());
        store.put(ch.clone());
        assert_eq!(store.get(&key), Some(&ch));
        assert!(store.contains(&key));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_is_full_replace() {
        let mut store = ChannelStore::new();
        let mut ch = make_channel(1, 5000);
        let key = ch.key();
        store.put(ch.clone());

        ch.total_deposited = 6000;
        ch.balance_a = 6000;
        store.put(ch.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key).unwrap().total_deposited, 6000);
    }

    #[test]
    fn lookup_is_by_full_triple() {
        let mut store = ChannelStore::new();
        let ch = make_channel(1, 5000);
        store.put(ch.clone());

        // Same id, different counterparty: a distinct key.
        let mut other_key = ch.key();
        other_key.participant_b = ParticipantId::from_bytes([0xcc; 20]);
        assert!(store.get(&other_key).is_none());
    }

    #[test]
    fn custodied_total_counts_open_only() {
        let mut store = ChannelStore::new();
        store.put(make_channel(1, 5000));
        store.put(make_channel(2, 3000));
        assert_eq!(store.custodied_total(), 8000);
        assert_eq!(store.open_count(), 2);

        let closed = make_channel(3, 9000).into_closed();
        store.put(closed);
        assert_eq!(store.custodied_total(), 8000);
        assert_eq!(store.open_count(), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn tombstone_still_occupies_key() {
        let mut store = ChannelStore::new();
        let ch = make_channel(1, 5000);
        let key = ch.key();
        store.put(ch.into_closed());

        // The tombstone is found (read-only queries return it), and its
        // presence is what blocks re-creation of the triple.
        assert!(store.contains(&key));
        let tomb = store.get(&key).unwrap();
        assert!(!tomb.is_open);
        assert_eq!(tomb.total_deposited, 0);
    }

    #[test]
    fn empty_store() {
        let store = ChannelStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.custodied_total(), 0);
        assert_eq!(store.channels().count(), 0);
    }
}
