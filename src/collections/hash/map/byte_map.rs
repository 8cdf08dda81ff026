use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;

use derive_more::IsVariant;

use super::{Iter, IterMut, TableFull};
use crate::collections::contiguous::Sequence;
use crate::util::fmt::DebugRaw;
use crate::util::option::OptionExtension;

const MIN_ALLOCATED_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

const LOAD_FACTOR_NUMERATOR: usize = 7;
const LOAD_FACTOR_DENOMINATOR: usize = 10;

/// Hashes a byte string with the DJB-style rolling hash the map probes with: seed 5381 and the
/// per-byte update `hash = byte + ((hash << 5) ^ hash)`, all wrapping.
///
/// Deterministic and cheap, but neither cryptographic nor resistant to adversarial input. Don't
/// feed a [`ByteMap`] attacker-controlled keys and expect even distribution.
pub fn hash_bytes(key: &[u8]) -> u64 {
    let mut hash: u64 = 5381;
    for byte in key {
        hash = (*byte as u64).wrapping_add((hash << 5) ^ hash);
    }
    hash
}

/// One slot of the flat table. Tombstone marks "previously occupied": probes continue through it
/// when searching but may reuse it when inserting, which keeps probe chains intact after removal.
#[derive(IsVariant)]
pub(crate) enum Slot<V> {
    Empty,
    Tombstone,
    Occupied(Sequence<u8>, V),
}

/// An open-addressed map from byte strings to values of `V`, using linear probing with
/// wraparound for collision resolution.
///
/// All entries live directly in a flat slot array; a colliding key walks forward (wrapping at the
/// capacity) until it finds its own slot. Keys are copied into the map on insertion and owned by
/// it, as are the values. Removal writes a tombstone rather than emptying the slot, so entries
/// whose probe sequence passed through the removed slot stay reachable; tombstones are discarded
/// whenever the table rehashes.
///
/// [`insert`](ByteMap::insert) grows the table (doubling, rehashing every live entry) when
/// occupancy crosses 7/10 of the capacity. Callers that want the fixed-slot-count behavior
/// instead use [`insert_within_cap`](ByteMap::insert_within_cap), which never reallocates and
/// reports [`TableFull`] rather than probing out of bounds.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the map.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`**, `O(n)` |
/// | `insert_within_cap` | `O(1)`* |
/// | `get` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `reserve` | `O(n)`***, `O(1)` |
///
/// \* In the event of a hash collision, these methods walk the probe chain until a valid slot is
/// found. Chains stay short while the load factor is respected.
///
/// \** If the map would exceed its load factor, `insert` takes `O(n)` for the rehash. \* applies
/// as well.
///
/// \*** If the map already has enough capacity for the additional entries, `reserve` is `O(1)`.
pub struct ByteMap<V> {
    pub(crate) slots: Sequence<Slot<V>>,
    pub(crate) len: usize,
    pub(crate) tombstones: usize,
}

impl<V> ByteMap<V> {
    /// Creates a new map with capacity 0. Memory will be allocated on the first insertion.
    pub const fn new() -> ByteMap<V> {
        ByteMap {
            slots: Sequence::new(),
            len: 0,
            tombstones: 0,
        }
    }

    /// Creates a new map with exactly the provided `cap`acity, allowing insertions without
    /// reallocation.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn with_cap(cap: usize) -> ByteMap<V> {
        ByteMap {
            slots: empty_slots(cap),
            len: 0,
            tombstones: 0,
        }
    }

    /// Returns the number of entries in the map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity (total slot count) of the map.
    pub const fn cap(&self) -> usize {
        self.slots.len()
    }

    /// Inserts the provided `key`-`value` pair, increasing the capacity if the load factor
    /// requires it. If the key was already present, its value is replaced and the previous value
    /// returned; the length counts the key once, not per insertion.
    ///
    /// The key is copied into the map only when a new entry is created; an overwrite keeps the
    /// existing key.
    ///
    /// # Panics
    /// Panics if the memory layout size of a grown table would exceed [`isize::MAX`].
    pub fn insert(&mut self, key: &[u8], value: V) -> Option<V> {
        if self.should_grow() {
            self.grow();
        }

        // UNREACHABLE: We've just grown if necessary, so occupancy is below the load factor and
        // a free slot exists on every probe chain.
        let index = unsafe { self.probe_insert(key).unreachable() };

        self.write_slot(index, key, value)
    }

    /// Inserts the provided `key`-`value` pair without ever reallocating: the capacity chosen at
    /// construction is final. When a full probe cycle finds neither the key nor a reusable slot,
    /// the insertion is rejected with [`TableFull`] instead of probing out of bounds.
    ///
    /// # Errors
    /// Returns [`TableFull`] if every slot is occupied by another key (always the case for a
    /// capacity of 0).
    pub fn insert_within_cap(&mut self, key: &[u8], value: V) -> Result<Option<V>, TableFull> {
        let index = self.probe_insert(key).ok_or(TableFull { cap: self.cap() })?;

        Ok(self.write_slot(index, key, value))
    }

    /// Returns the entry for the provided `key` as a key-value pair, or None if there is no
    /// entry.
    pub fn get_entry(&self, key: &[u8]) -> Option<(&[u8], &V)> {
        let index = self.find_occupied(key)?;

        match &self.slots[index] {
            Slot::Occupied(existing, value) => Some((existing, value)),
            _ => None,
        }
    }

    /// Returns a reference to the value associated with the provided `key`, or None if the map
    /// contains no entry for it.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.get_entry(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value associated with the provided `key`, or None if
    /// the map contains no entry for it.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let index = self.find_occupied(key)?;

        match &mut self.slots[index] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if there is an entry for the provided `key`.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.find_occupied(key).is_some()
    }

    /// Removes the entry for the provided `key`, returning its value if it existed.
    ///
    /// The slot is tombstoned rather than emptied so that entries whose probe sequence passed
    /// through it remain reachable. The tombstone is reclaimed by a later insertion on the same
    /// chain or by the next rehash.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let index = self.find_occupied(key)?;

        let Slot::Occupied(_, value) = mem::replace(&mut self.slots[index], Slot::Tombstone)
        else {
            // find_occupied only ever returns occupied indices.
            unreachable!()
        };

        self.len -= 1;
        self.tombstones += 1;
        Some(value)
    }

    /// Increases the capacity of the map to ensure that len + `extra` entries will fit without
    /// exceeding the load factor.
    ///
    /// # Panics
    /// Panics on capacity overflow.
    pub fn reserve(&mut self, extra: usize) {
        // Round up: flooring here could leave the target occupancy at the load factor and grow
        // on the last reserved insertion anyway.
        let new_cap = (self.len.checked_add(extra).expect("Capacity overflow!")
            * LOAD_FACTOR_DENOMINATOR).div_ceil(LOAD_FACTOR_NUMERATOR);
        if new_cap <= self.cap() { return; }

        self.realloc_with_cap(new_cap);
    }

    /// Returns an iterator over all key-value pairs in the map, as references. Entries are
    /// yielded in slot order, which is not the insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs in the map, with mutable references to the
    /// values. Keys stay immutable because mutating one would change its hash.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        self.into_iter()
    }
}

impl<V> ByteMap<V> {
    /// Determines whether occupancy (entries plus tombstones) has reached the load factor,
    /// meaning the table should rehash before accepting a new entry.
    pub(crate) const fn should_grow(&self) -> bool {
        self.len + self.tombstones
            >= self.cap() * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR
    }

    /// Grows the map by the growth factor, ensuring that it can hold additional entries.
    pub(crate) fn grow(&mut self) {
        let new_cap = cmp::max(self.cap() * GROWTH_FACTOR, MIN_ALLOCATED_CAP);

        self.realloc_with_cap(new_cap);
    }

    /// Rehashes the map into a fresh slot array of capacity `new_cap`, if doing so wouldn't cause
    /// the map to overload. Tombstones are not migrated; every live entry is re-probed from its
    /// home slot. (There isn't a logical way for the map to shrink and drop entries, so that
    /// isn't allowed.)
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) {
        // Can't handle dropping entries at this point.
        if new_cap * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR < self.len { return; }

        // Replace the slot array first so that we can consume the old one.
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_cap));
        self.tombstones = 0;

        for slot in old_slots {
            if let Slot::Occupied(key, value) = slot {
                // UNREACHABLE: The guard above keeps the live entries below the load factor of
                // the new table, so every probe chain ends at an empty slot.
                let index = unsafe { self.probe_insert(&key).unreachable() };

                self.slots[index] = Slot::Occupied(key, value);
            }
        }
    }

    /// Calculates the home slot for the provided `key` (or None if the map has 0 capacity). This
    /// is where its probe sequence starts; see [`ByteMap::find_occupied`] and
    /// [`ByteMap::probe_insert`] for the walks themselves.
    pub(crate) fn home_index(&self, key: &[u8]) -> Option<usize> {
        hash_bytes(key).checked_rem(self.cap() as u64).map(|i| i as usize)
    }

    /// Walks the probe sequence for `key` looking for its occupied slot. Tombstones are walked
    /// through; an empty slot or a full cycle without a match means the key is absent.
    pub(crate) fn find_occupied(&self, key: &[u8]) -> Option<usize> {
        let mut index = self.home_index(key)?;

        for _ in 0..self.cap() {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(existing, _) if &**existing == key => return Some(index),
                _ => {},
            }

            // UNCHECKED: home_index returned Some, so the cap is not 0.
            index = (index + 1) % self.cap();
        }

        None
    }

    /// Walks the probe sequence for `key` looking for the slot an insertion should write to: the
    /// key's own slot if present, otherwise the first tombstone on the chain, otherwise the empty
    /// slot that ends it. Returns None when a full cycle finds nothing usable (the table is full
    /// of other keys, or has capacity 0).
    pub(crate) fn probe_insert(&self, key: &[u8]) -> Option<usize> {
        let mut index = self.home_index(key)?;
        let mut reusable = None;

        for _ in 0..self.cap() {
            match &self.slots[index] {
                Slot::Empty => return Some(reusable.unwrap_or(index)),
                Slot::Occupied(existing, _) if &**existing == key => return Some(index),
                Slot::Tombstone if reusable.is_none() => reusable = Some(index),
                _ => {},
            }

            // UNCHECKED: home_index returned Some, so the cap is not 0.
            index = (index + 1) % self.cap();
        }

        reusable
    }

    /// Writes `key`-`value` into the slot `probe_insert` selected, maintaining the entry and
    /// tombstone counts. Returns the previous value on overwrite.
    fn write_slot(&mut self, index: usize, key: &[u8], value: V) -> Option<V> {
        match &mut self.slots[index] {
            Slot::Occupied(_, existing) => Some(mem::replace(existing, value)),
            slot => {
                if slot.is_tombstone() {
                    self.tombstones -= 1;
                }
                *slot = Slot::Occupied(key.iter().copied().collect(), value);
                self.len += 1;
                None
            },
        }
    }
}

/// Builds a slot array of `cap` empty slots, allocated exactly.
fn empty_slots<V>(cap: usize) -> Sequence<Slot<V>> {
    let mut slots = Sequence::with_cap(cap);
    for _ in 0..cap {
        slots.push(Slot::Empty);
    }
    slots
}

impl<V> Default for ByteMap<V> {
    fn default() -> Self {
        ByteMap::new()
    }
}

impl<V: Debug> Debug for ByteMap<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteMap")
            .field("slots", &SlotsDebug(self))
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("tombstones", &self.tombstones)
            .finish()
    }
}

struct SlotsDebug<'a, V>(&'a ByteMap<V>);

impl<V: Debug> Debug for SlotsDebug<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.slots.iter().map(|slot| DebugRaw(match slot {
                Slot::Empty => "-".into(),
                Slot::Tombstone => "x".into(),
                Slot::Occupied(key, value) => {
                    format!("({:?}: {value:?})", String::from_utf8_lossy(key))
                },
            })))
            .finish()
    }
}

impl<V: Debug> Display for ByteMap<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map()
            .entries(self.iter().map(|(key, value)| {
                (DebugRaw(format!("{:?}", String::from_utf8_lossy(key))), value)
            }))
            .finish()
    }
}
