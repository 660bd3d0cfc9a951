//! Canonical state keys and the visited-state set.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use crate::channel::Channel;

/// String identity of a full channel vector.
///
/// Formed by concatenating each channel's symbol in topology order. Two
/// configurations are the same state iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StateKey(String);

impl StateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StateKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StateKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Compute the canonical key of a channel vector.
pub fn canonical_key(channels: &[Channel]) -> StateKey {
    // Unbound symbols carry a marker, so two bytes is the common worst case.
    let mut key = String::with_capacity(channels.len() * 2);
    for channel in channels {
        key.push_str(channel.symbol());
    }
    StateKey(key)
}

/// Settled states discovered so far.
///
/// Grows monotonically; insertion order is kept so reports list states in
/// the order the search first settled into them.
#[derive(Debug, Clone, Default)]
pub struct KnownStates {
    seen: HashSet<StateKey>,
    order: Vec<StateKey>,
}

impl KnownStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a state known. Returns `true` if it was new.
    pub fn insert(&mut self, key: &StateKey) -> bool {
        if self.seen.contains(key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.order.push(key.clone());
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Known states in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &StateKey> {
        self.order.iter()
    }

    pub fn into_vec(self) -> Vec<StateKey> {
        self.order
    }
}
