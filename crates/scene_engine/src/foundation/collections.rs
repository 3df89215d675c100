//! Specialized collection types

pub use slotmap::{new_key_type, Key, SlotMap};

/// Generational arena that also remembers insertion order.
///
/// Keys stay valid until their value is removed; a removed key never resolves
/// again, even if its slot is reused. Iteration follows insertion order rather
/// than slot order.
pub struct OrderedArena<K: Key, T> {
    slots: SlotMap<K, T>,
    order: Vec<K>,
}

impl<K: Key, T> OrderedArena<K, T> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Insert a value at the end of the iteration order
    pub fn insert(&mut self, value: T) -> K {
        let key = self.slots.insert(value);
        self.order.push(key);
        key
    }

    /// Remove a value by key
    pub fn remove(&mut self, key: K) -> Option<T> {
        let value = self.slots.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(value)
    }

    /// Get a value by key
    pub fn get(&self, key: K) -> Option<&T> {
        self.slots.get(key)
    }

    /// Get a mutable value by key
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots.get_mut(key)
    }

    /// Whether the key still resolves
    pub fn contains(&self, key: K) -> bool {
        self.slots.contains_key(key)
    }

    /// Snapshot of the live keys in insertion order
    pub fn keys(&self) -> Vec<K> {
        self.order.clone()
    }

    /// Iterate values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.slots.get(*key).map(|value| (*key, value)))
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

impl<K: Key, T> Default for OrderedArena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
