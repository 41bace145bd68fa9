//! Insertion-order-preserving map with case-insensitive keys.
//!
//! Blueprint registration depends on two properties at once: lookups must be
//! case-insensitive, and positions must track registration order because
//! default selection, index selection, and batch cycling are all positional.
//! `OrderedMap` folds keys to lowercase for identity while remembering the
//! spelling of the most recent registration.

use indexmap::IndexMap;

struct Slot<V> {
    /// Key spelling from the most recent insert at this logical key.
    key: String,
    value: V,
}

/// An order-preserving map whose keys compare case-insensitively.
pub struct OrderedMap<V> {
    slots: IndexMap<String, Slot<V>>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            slots: IndexMap::new(),
        }
    }

    /// Insert a value. A new logical key appends at the end; an existing one
    /// (case-insensitive) is overwritten in place without moving. Returns the
    /// displaced value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let folded = key.to_lowercase();
        self.slots
            .insert(folded, Slot { key, value })
            .map(|slot| slot.value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.slots.get(&key.to_lowercase()).map(|slot| &slot.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(&key.to_lowercase())
    }

    /// Position of a key in insertion order.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.slots.get_index_of(&key.to_lowercase())
    }

    /// The `(key, value)` pair at a position, in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&str, &V)> {
        self.slots
            .get_index(index)
            .map(|(_, slot)| (slot.key.as_str(), &slot.value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Keys in insertion order, with their most recently registered spelling.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.values().map(|slot| slot.key.as_str())
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots
            .values()
            .map(|slot| (slot.key.as_str(), &slot.value))
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
