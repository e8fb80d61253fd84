//! Ring buffer - the slot arena behind the memory engine
//!
//! A `RingBuffer` owns three structures that must stay synchronized: the
//! slot arena (`Vec<Option<Entry>>`), the key-to-slot index, and a free list
//! of vacated slots. `store` claims slots from the free list first, then
//! from the wrapping write cursor; `remove` vacates a slot without moving
//! any other entry, so index positions never have to be rewritten.

use std::collections::HashMap;

use tracing::debug;

use crate::{StorageConfig, DEFAULT_CAPACITY};

/// One stored key-value pair, occupying a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The key this entry is indexed under
    pub key: Vec<u8>,
    /// The stored value
    pub value: Vec<u8>,
}

/// Bounded or unbounded slot arena with a key index and a free list.
///
/// Single-threaded by design; the thread-safe [`MemoryStorage`] wrapper
/// serializes access to it.
///
/// [`MemoryStorage`]: crate::MemoryStorage
#[derive(Debug)]
pub struct RingBuffer {
    /// Slot arena, grown lazily up to `capacity` in bounded mode
    slots: Vec<Option<Entry>>,
    /// Key to the slot currently holding its live entry
    index: HashMap<Vec<u8>, usize>,
    /// Vacated slots, reused before the cursor claims fresh ones
    free: Vec<usize>,
    /// Next fresh slot; wraps at `capacity` in bounded mode
    cursor: usize,
    /// Number of occupied slots
    occupied: usize,
    infinite: bool,
    capacity: usize,
}

impl RingBuffer {
    /// Creates an empty ring buffer for the given configuration.
    ///
    /// A capacity of zero falls back to [`DEFAULT_CAPACITY`].
    pub fn new(config: StorageConfig) -> Self {
        let capacity = if config.capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            config.capacity
        };

        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            free: Vec::new(),
            cursor: 0,
            occupied: 0,
            infinite: config.infinite,
            capacity,
        }
    }

    /// Unconditionally writes a new entry, claiming a slot for it.
    ///
    /// When the claimed slot already holds an entry, that occupant is
    /// displaced: its index mapping is removed so no stale lookup can reach
    /// the slot. A key stored twice keeps its newest slot in the index and
    /// leaves the older entry behind as an unindexed duplicate until the
    /// cursor reclaims it.
    pub fn store(&mut self, key: &[u8], value: &[u8]) {
        let slot = self.claim_slot();

        if let Some(displaced) = self.slots[slot].take() {
            // Only drop the occupant's mapping if it still points here; a
            // stale duplicate's key may have moved to a newer slot.
            if self.index.get(&displaced.key) == Some(&slot) {
                debug!(slot, "evicting slot occupant");
                self.index.remove(&displaced.key);
            }
            self.occupied -= 1;
        }

        self.slots[slot] = Some(Entry {
            key: key.to_vec(),
            value: value.to_vec(),
        });
        self.index.insert(key.to_vec(), slot);
        self.occupied += 1;
    }

    /// Claims the next writable slot: free list first, then the cursor.
    fn claim_slot(&mut self) -> usize {
        if let Some(slot) = self.free.pop() {
            return slot;
        }

        if self.infinite {
            self.slots.push(None);
            self.cursor = self.slots.len();
            return self.slots.len() - 1;
        }

        // Wrapping depends only on capacity, never on the live-entry count
        if self.cursor >= self.capacity {
            self.cursor = 0;
        }
        let slot = self.cursor;
        if slot == self.slots.len() {
            self.slots.push(None);
        }
        self.cursor += 1;
        slot
    }

    /// Returns the value for `key`, or `None` when absent.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.index
            .get(key)
            .and_then(|&slot| self.slots[slot].as_ref())
            .map(|entry| entry.value.as_slice())
    }

    /// Updates an existing key's value in place, or stores it fresh.
    ///
    /// An existing key keeps its slot and its index mapping.
    pub fn set(&mut self, key: &[u8], value: &[u8]) {
        if let Some(&slot) = self.index.get(key) {
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.value = value.to_vec();
                return;
            }
        }
        self.store(key, value);
    }

    /// Whether `key` currently has a live entry.
    pub fn has(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, vacating its slot onto the free list.
    ///
    /// No other entry moves, so no index mapping is ever rewritten. Absent
    /// keys are a no-op.
    pub fn remove(&mut self, key: &[u8]) {
        if let Some(slot) = self.index.remove(key) {
            if self.slots[slot].take().is_some() {
                self.occupied -= 1;
            }
            self.free.push(slot);
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// The configured slot capacity (ignored in infinite mode).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer grows without bound.
    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    /// The next fresh slot the cursor would claim.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of slots currently on the free list.
    pub fn free_slots(&self) -> usize {
        self.free.len()
    }

    /// Number of slots allocated so far (occupied + vacated).
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Iterates occupied slots as `(slot, entry)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|e| (slot, e)))
    }

    /// Drops every entry and resets the cursor and free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.free.clear();
        self.cursor = 0;
        self.occupied = 0;
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}
