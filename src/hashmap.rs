//! Fixed capacity open addressing map.
//!
//! Every entry lives directly in one boxed slice of slots. Collisions walk forward one slot at a
//! time, wrapping at the end, and removals leave a tombstone behind so that keys further along
//! the same run stay reachable. The table never grows: once every slot is occupied, inserts fail
//! with [`MapError::TableFull`].

use std::cell::Cell;
use std::fmt;

use tracing::Level;

use crate::{error::MapError, options::MapOptions, stats::MapStats};

pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    Occupied { hash: i64, key: K, value: V },
    Tombstone,
}

fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

pub struct OpenAddressingMap<K, V, F> {
    slots: Box<[Slot<K, V>]>,
    hasher: F,
    len: usize,
    tombstones: usize,
    stats: Cell<MapStats>,
}

impl<K, V, F> OpenAddressingMap<K, V, F>
where
    K: Eq,
    F: Fn(&K) -> i64,
{
    pub fn new(hasher: F) -> OpenAddressingMap<K, V, F> {
        OpenAddressingMap::with_capacity(DEFAULT_CAPACITY, hasher)
    }

    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize, hasher: F) -> OpenAddressingMap<K, V, F> {
        assert!(capacity > 0, "capacity must be positive");
        OpenAddressingMap {
            slots: empty_slots(capacity),
            hasher,
            len: 0,
            tombstones: 0,
            stats: Cell::new(MapStats::default()),
        }
    }

    pub fn from_options(options: &MapOptions, hasher: F) -> OpenAddressingMap<K, V, F> {
        OpenAddressingMap::with_capacity(options.capacity, hasher)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Fraction of slots that are not `Empty`. Tombstones count, since probes still walk them.
    pub fn load_factor(&self) -> f64 {
        (self.len + self.tombstones) as f64 / self.capacity() as f64
    }

    pub fn stats(&self) -> MapStats {
        self.stats.get()
    }

    pub fn reset_stats(&self) {
        self.stats.set(MapStats::default());
    }

    fn record(&self, update: impl FnOnce(&mut MapStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    fn home(&self, hash: i64) -> usize {
        (hash.unsigned_abs() % self.capacity() as u64) as usize
    }

    fn next(&self, index: usize) -> usize {
        if index + 1 < self.capacity() {
            index + 1
        } else {
            0
        }
    }

    /// Walks the probe sequence of `key` and returns the index of the slot holding it.
    ///
    /// Stops at the first `Empty` slot, or after visiting every slot once. Tombstones are
    /// stepped over.
    fn find(&self, key: &K) -> Option<usize> {
        let hash = (self.hasher)(key);
        let mut index = self.home(hash);
        let mut steps = 0;
        let mut found = None;
        for _ in 0..self.capacity() {
            steps += 1;
            match &self.slots[index] {
                Slot::Occupied { hash: h, key: k, .. } if *h == hash && k == key => {
                    found = Some(index);
                    break;
                }
                Slot::Empty => break,
                Slot::Occupied { .. } | Slot::Tombstone => {}
            }
            index = self.next(index);
        }
        tracing::event!(Level::TRACE, "index" = ?found, "steps" = steps, "probed");
        self.record(|s| {
            s.probes += steps;
            if found.is_some() {
                s.hits += 1;
            } else {
                s.misses += 1;
            }
        });
        found
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &K) -> Result<&V, MapError> {
        let index = self.find(key).ok_or(MapError::KeyNotFound)?;
        match &self.slots[index] {
            Slot::Occupied { value, .. } => Ok(value),
            Slot::Empty | Slot::Tombstone => Err(MapError::KeyNotFound),
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, MapError> {
        let index = self.find(key).ok_or(MapError::KeyNotFound)?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Ok(value),
            Slot::Empty | Slot::Tombstone => Err(MapError::KeyNotFound),
        }
    }

    /// Overwrites the value of a key that is already present. Never inserts.
    pub fn assign(&mut self, key: &K, value: V) -> Result<(), MapError> {
        let slot = self.get_mut(key).inspect_err(|_| {
            tracing::event!(Level::DEBUG, name = "Assign to missing key");
        })?;
        *slot = value;
        Ok(())
    }

    /// Stores a new entry in the first `Empty` or `Tombstone` slot of the key's probe sequence.
    ///
    /// The walk continues past tombstones until an `Empty` slot so a key stored further along
    /// the run is reported as [`MapError::DuplicateKey`] instead of being stored twice.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), MapError> {
        let hash = (self.hasher)(&key);
        let mut index = self.home(hash);
        let mut steps = 0;
        let mut landing = None;
        for _ in 0..self.capacity() {
            steps += 1;
            match &self.slots[index] {
                Slot::Occupied { hash: h, key: k, .. } => {
                    if *h == hash && *k == key {
                        tracing::event!(Level::DEBUG, name = "Duplicate key", "index" = index);
                        return Err(self.reject(steps, MapError::DuplicateKey));
                    }
                }
                Slot::Tombstone => {
                    landing.get_or_insert(index);
                }
                Slot::Empty => {
                    landing.get_or_insert(index);
                    break;
                }
            }
            index = self.next(index);
        }

        let Some(index) = landing else {
            tracing::event!(Level::DEBUG, name = "Table full", "capacity" = self.capacity());
            let capacity = self.capacity();
            return Err(self.reject(steps, MapError::TableFull { capacity }));
        };
        if let Slot::Tombstone = self.slots[index] {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied { hash, key, value };
        self.len += 1;
        tracing::event!(Level::TRACE, "index" = index, "steps" = steps, "inserted");
        self.record(|s| {
            s.accepted += 1;
            s.probes += steps;
        });
        Ok(())
    }

    fn reject(&self, steps: usize, err: MapError) -> MapError {
        self.record(|s| {
            s.rejected += 1;
            s.probes += steps;
        });
        err
    }

    /// Tombstones the key's slot and hands the value back to the caller.
    pub fn remove(&mut self, key: &K) -> Result<V, MapError> {
        let index = self.find(key).ok_or(MapError::KeyNotFound)?;
        let slot = std::mem::replace(&mut self.slots[index], Slot::Tombstone);
        let Slot::Occupied { value, .. } = slot else {
            return Err(MapError::KeyNotFound);
        };
        self.len -= 1;
        self.tombstones += 1;
        self.record(|s| s.removals += 1);
        tracing::event!(Level::TRACE, "index" = index, "removed");
        Ok(value)
    }

    /// Drops every entry and tombstone, leaving a fresh table of the same capacity.
    #[tracing::instrument(skip(self), fields(capacity = self.capacity(), len = self.len))]
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.capacity());
        self.len = 0;
        self.tombstones = 0;
    }
}

impl<K, V, F> fmt::Debug for OpenAddressingMap<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("capacity", &self.slots.len())
            .field("len", &self.len)
            .field("tombstones", &self.tombstones)
            .finish()
    }
}
