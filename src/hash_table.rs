//! Fixed-capacity hash table with a selectable collision policy.
//!
//! The hash function is kept exactly as the visualizer shows it, because the collision
//! count and load factor it displays depend on where each key lands:
//!
//! - integers: `key mod capacity` (Euclidean, so negative keys stay in range)
//! - strings: `h = (h * 31 + code_unit) mod capacity` over the UTF-16 code units
//!
//! Under linear probing the default [`ProbeDeletion::Clear`] empties the slot on delete.
//! That can hide keys which were displaced past the deleted slot: a later `search` stops at
//! the hole. [`ProbeDeletion::Tombstone`] marks the slot instead and avoids the gap.

use crate::catalog::Algorithm;
use crate::error::HashTableError;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig, Traced};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key accepted by the table: an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HashKey {
    Int(i64),
    Str(String),
}

impl From<i64> for HashKey {
    fn from(key: i64) -> Self {
        HashKey::Int(key)
    }
}

impl From<&str> for HashKey {
    fn from(key: &str) -> Self {
        HashKey::Str(key.to_string())
    }
}

impl From<String> for HashKey {
    fn from(key: String) -> Self {
        HashKey::Str(key)
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Int(key) => write!(f, "{}", key),
            HashKey::Str(key) => write!(f, "\"{}\"", key),
        }
    }
}

impl HashKey {
    /// Bucket index of this key in a table with `capacity` slots.
    pub fn bucket(&self, capacity: usize) -> usize {
        match self {
            HashKey::Int(key) => key.rem_euclid(capacity as i64) as usize,
            HashKey::Str(key) => {
                let capacity = capacity as u64;
                key.encode_utf16()
                    .fold(0u64, |hash, unit| (hash * 31 + unit as u64) % capacity)
                    as usize
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    SeparateChaining,
    LinearProbing,
}

/// What a linear-probing delete leaves behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeDeletion {
    #[default]
    Clear,
    Tombstone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<V> {
    pub key: HashKey,
    pub value: V,
}

#[derive(Debug, Clone, PartialEq)]
enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
    Tombstone,
}

#[derive(Debug, Clone)]
enum Table<V> {
    Chained(Vec<Vec<Entry<V>>>),
    Probed(Vec<Slot<V>>),
}

impl<V> Table<V> {
    fn with_capacity(policy: CollisionPolicy, capacity: usize) -> Self {
        match policy {
            CollisionPolicy::SeparateChaining => {
                Table::Chained((0..capacity).map(|_| Vec::new()).collect())
            }
            CollisionPolicy::LinearProbing => {
                Table::Probed((0..capacity).map(|_| Slot::Empty).collect())
            }
        }
    }
}

/// One bucket as the visualizer draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketView<V> {
    pub index: usize,
    pub entries: Vec<Entry<V>>,
    pub tombstone: bool,
    pub is_collision: bool,
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Full,
}

#[derive(Debug, Clone)]
pub struct HashTable<V> {
    table: Table<V>,
    capacity: usize,
    count: usize,
    policy: CollisionPolicy,
    deletion: ProbeDeletion,
    config: TraceConfig,
    last_trace: Trace<Vec<BucketView<V>>>,
}

type Snapshot<V> = Vec<BucketView<V>>;

impl<V: Clone + fmt::Display> HashTable<V> {
    pub fn new(capacity: usize, policy: CollisionPolicy) -> Result<Self, HashTableError> {
        Self::with_config(capacity, policy, TraceConfig::default())
    }

    pub fn with_config(
        capacity: usize,
        policy: CollisionPolicy,
        config: TraceConfig,
    ) -> Result<Self, HashTableError> {
        if capacity == 0 {
            return Err(HashTableError::InvalidCapacity);
        }
        Ok(HashTable {
            table: Table::with_capacity(policy, capacity),
            capacity,
            count: 0,
            policy,
            deletion: ProbeDeletion::default(),
            config,
            last_trace: Trace::default(),
        })
    }

    /// Switches linear-probing deletes to tombstones.
    pub fn with_deletion(mut self, deletion: ProbeDeletion) -> Self {
        self.deletion = deletion;
        self
    }

    pub fn hash(&self, key: &HashKey) -> usize {
        key.bucket(self.capacity)
    }

    /// Inserts or updates `key`.
    ///
    /// Under linear probing a table with no free slot rejects new keys with
    /// `CapacityExceeded` and is left unchanged.
    pub fn insert(&mut self, key: impl Into<HashKey>, value: V) -> Result<(), HashTableError> {
        let mut rec = Recorder::new(self.config, Algorithm::HashTable);
        let result = self.insert_entry(key.into(), value, &mut rec);
        self.last_trace = rec.finish();
        result.map(|_| ())
    }

    /// Returns true when a new key was added, false when an existing one was updated.
    fn insert_entry(
        &mut self,
        key: HashKey,
        value: V,
        rec: &mut Recorder<Snapshot<V>>,
    ) -> Result<bool, HashTableError> {
        let home = self.hash(&key);
        rec.record(
            Action::Start,
            format!("hash({}) = {}", key, home),
            Some(Highlight::Slot {
                bucket: home,
                position: None,
            }),
            || self.buckets(),
        );

        match self.policy {
            CollisionPolicy::SeparateChaining => {
                let existing = self.scan_chain(home, &key, rec);
                let description;
                let position;
                let added;
                match (&mut self.table, existing) {
                    (Table::Chained(buckets), Some(at)) => {
                        buckets[home][at].value = value;
                        description = format!("Update {} in bucket {}", key, home);
                        position = at;
                        added = false;
                    }
                    (Table::Chained(buckets), None) => {
                        description = format!("Append {} -> {} to bucket {}", key, value, home);
                        buckets[home].push(Entry { key, value });
                        position = buckets[home].len() - 1;
                        self.count += 1;
                        added = true;
                    }
                    _ => return Ok(false),
                }
                rec.record(
                    if added { Action::Insert } else { Action::Update },
                    description,
                    Some(Highlight::Slot {
                        bucket: home,
                        position: Some(position),
                    }),
                    || self.buckets(),
                );
                Ok(added)
            }
            CollisionPolicy::LinearProbing => match self.probe(&key, home, rec) {
                Probe::Found(index) => {
                    if let Table::Probed(slots) = &mut self.table {
                        slots[index] = Slot::Occupied(Entry { key: key.clone(), value });
                    }
                    rec.record(
                        Action::Update,
                        format!("Update {} in slot {}", key, index),
                        Some(Highlight::Slot {
                            bucket: index,
                            position: None,
                        }),
                        || self.buckets(),
                    );
                    Ok(false)
                }
                Probe::Vacant(index) => {
                    let description = format!("Place {} -> {} in slot {}", key, value, index);
                    if let Table::Probed(slots) = &mut self.table {
                        slots[index] = Slot::Occupied(Entry { key, value });
                    }
                    self.count += 1;
                    rec.record(
                        Action::Insert,
                        description,
                        Some(Highlight::Slot {
                            bucket: index,
                            position: None,
                        }),
                        || self.buckets(),
                    );
                    Ok(true)
                }
                Probe::Full => {
                    warn!("no free slot for {} in a table of {}", key, self.capacity);
                    rec.record(
                        Action::NotFound,
                        format!("Table is full, {} was not inserted", key),
                        None,
                        || self.buckets(),
                    );
                    Err(HashTableError::CapacityExceeded {
                        capacity: self.capacity,
                    })
                }
            },
        }
    }

    fn scan_chain(
        &self,
        bucket: usize,
        key: &HashKey,
        rec: &mut Recorder<Snapshot<V>>,
    ) -> Option<usize> {
        let Table::Chained(buckets) = &self.table else {
            return None;
        };
        for (position, entry) in buckets[bucket].iter().enumerate() {
            rec.record(
                Action::Compare,
                format!("Compare {} with {}", entry.key, key),
                Some(Highlight::Slot {
                    bucket,
                    position: Some(position),
                }),
                || self.buckets(),
            );
            if entry.key == *key {
                return Some(position);
            }
        }
        None
    }

    /// Walks `(home + i) mod capacity` for at most `capacity` slots.
    fn probe(&self, key: &HashKey, home: usize, rec: &mut Recorder<Snapshot<V>>) -> Probe {
        let Table::Probed(slots) = &self.table else {
            return Probe::Full;
        };
        let mut tombstone = None;
        let mut index = home;
        for _ in 0..self.capacity {
            let next = (index + 1) % self.capacity;
            match &slots[index] {
                Slot::Empty => return Probe::Vacant(tombstone.unwrap_or(index)),
                Slot::Occupied(entry) if entry.key == *key => return Probe::Found(index),
                Slot::Occupied(entry) => rec.record(
                    Action::Probe,
                    format!("Slot {} holds {}, probe slot {}", index, entry.key, next),
                    Some(Highlight::Slot {
                        bucket: index,
                        position: None,
                    }),
                    || self.buckets(),
                ),
                Slot::Tombstone => {
                    tombstone.get_or_insert(index);
                    rec.record(
                        Action::Probe,
                        format!("Slot {} is a tombstone, probe slot {}", index, next),
                        Some(Highlight::Slot {
                            bucket: index,
                            position: None,
                        }),
                        || self.buckets(),
                    );
                }
            }
            index = next;
        }
        tombstone.map_or(Probe::Full, Probe::Vacant)
    }

    /// Bucket and chain position of `key`, if present.
    fn locate(&self, key: &HashKey, rec: &mut Recorder<Snapshot<V>>) -> Option<(usize, usize)> {
        let home = self.hash(key);
        rec.record(
            Action::Start,
            format!("hash({}) = {}", key, home),
            Some(Highlight::Slot {
                bucket: home,
                position: None,
            }),
            || self.buckets(),
        );
        match self.policy {
            CollisionPolicy::SeparateChaining => {
                self.scan_chain(home, key, rec).map(|at| (home, at))
            }
            CollisionPolicy::LinearProbing => match self.probe(key, home, rec) {
                Probe::Found(index) => Some((index, 0)),
                Probe::Vacant(_) | Probe::Full => None,
            },
        }
    }

    fn entry_at(&self, bucket: usize, position: usize) -> Option<&Entry<V>> {
        match &self.table {
            Table::Chained(buckets) => buckets.get(bucket)?.get(position),
            Table::Probed(slots) => match slots.get(bucket)? {
                Slot::Occupied(entry) => Some(entry),
                _ => None,
            },
        }
    }

    pub fn search(&self, key: &HashKey) -> Option<&V> {
        let mut rec = Recorder::disabled(Algorithm::HashTable);
        let (bucket, position) = self.locate(key, &mut rec)?;
        self.entry_at(bucket, position).map(|e| &e.value)
    }

    pub fn search_traced(&self, key: &HashKey) -> Traced<Option<V>, Snapshot<V>> {
        let mut rec = Recorder::new(self.config, Algorithm::HashTable);
        let found = self.locate(key, &mut rec);
        let result = found
            .and_then(|(bucket, position)| self.entry_at(bucket, position))
            .map(|e| e.value.clone());
        match (found, &result) {
            (Some((bucket, position)), Some(value)) => rec.record(
                Action::Found,
                format!("Found {} -> {}", key, value),
                Some(Highlight::Slot {
                    bucket,
                    position: Some(position),
                }),
                || self.buckets(),
            ),
            _ => rec.record(
                Action::NotFound,
                format!("{} is not in the table", key),
                None,
                || self.buckets(),
            ),
        }
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    pub fn contains(&self, key: &HashKey) -> bool {
        self.search(key).is_some()
    }

    /// Removes `key`. Returns false when it was not present.
    pub fn delete(&mut self, key: &HashKey) -> bool {
        let mut rec = Recorder::new(self.config, Algorithm::HashTable);
        let removed = match self.locate(key, &mut rec) {
            Some((bucket, position)) => {
                match &mut self.table {
                    Table::Chained(buckets) => {
                        buckets[bucket].remove(position);
                    }
                    Table::Probed(slots) => {
                        slots[bucket] = match self.deletion {
                            ProbeDeletion::Clear => Slot::Empty,
                            ProbeDeletion::Tombstone => Slot::Tombstone,
                        };
                    }
                }
                self.count -= 1;
                rec.record(
                    Action::Remove,
                    format!("Remove {} from bucket {}", key, bucket),
                    Some(Highlight::Slot {
                        bucket,
                        position: Some(position),
                    }),
                    || self.buckets(),
                );
                true
            }
            None => {
                rec.record(
                    Action::NotFound,
                    format!("{} is not in the table", key),
                    None,
                    || self.buckets(),
                );
                false
            }
        };
        self.last_trace = rec.finish();
        removed
    }

    /// Rehashes every entry into a fresh table of `new_capacity` buckets.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), HashTableError> {
        if new_capacity == 0 {
            return Err(HashTableError::InvalidCapacity);
        }
        if self.policy == CollisionPolicy::LinearProbing && new_capacity < self.count {
            return Err(HashTableError::ShrinkBelowCount {
                requested: new_capacity,
                count: self.count,
            });
        }

        let mut rec = Recorder::new(self.config, Algorithm::HashTable);
        rec.record(
            Action::Start,
            format!("Resize from {} to {} buckets", self.capacity, new_capacity),
            None,
            || self.buckets(),
        );
        let entries = self.entries();
        self.table = Table::with_capacity(self.policy, new_capacity);
        self.capacity = new_capacity;
        self.count = 0;
        for entry in entries {
            self.insert_entry(entry.key, entry.value, &mut rec)?;
        }
        rec.record(
            Action::Done,
            format!("Rehashed {} entries", self.count),
            None,
            || self.buckets(),
        );
        debug!("resized hash table to {} buckets", new_capacity);
        self.last_trace = rec.finish();
        Ok(())
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity as f64
    }

    /// Chaining: extra entries per bucket. Probing: entries away from their home slot.
    pub fn collision_count(&self) -> usize {
        match &self.table {
            Table::Chained(buckets) => buckets.iter().map(|b| b.len().saturating_sub(1)).sum(),
            Table::Probed(slots) => slots
                .iter()
                .enumerate()
                .filter(|(index, slot)| match slot {
                    Slot::Occupied(entry) => self.hash(&entry.key) != *index,
                    _ => false,
                })
                .count(),
        }
    }

    pub fn buckets(&self) -> Vec<BucketView<V>> {
        match &self.table {
            Table::Chained(buckets) => buckets
                .iter()
                .enumerate()
                .map(|(index, bucket)| BucketView {
                    index,
                    entries: bucket.clone(),
                    tombstone: false,
                    is_collision: bucket.len() > 1,
                })
                .collect(),
            Table::Probed(slots) => slots
                .iter()
                .enumerate()
                .map(|(index, slot)| match slot {
                    Slot::Occupied(entry) => BucketView {
                        index,
                        entries: vec![entry.clone()],
                        tombstone: false,
                        is_collision: self.hash(&entry.key) != index,
                    },
                    Slot::Empty | Slot::Tombstone => BucketView {
                        index,
                        entries: Vec::new(),
                        tombstone: matches!(slot, Slot::Tombstone),
                        is_collision: false,
                    },
                })
                .collect(),
        }
    }

    /// Every entry in bucket order, chains front to back.
    pub fn entries(&self) -> Vec<Entry<V>> {
        match &self.table {
            Table::Chained(buckets) => buckets.iter().flatten().cloned().collect(),
            Table::Probed(slots) => slots
                .iter()
                .filter_map(|slot| match slot {
                    Slot::Occupied(entry) => Some(entry.clone()),
                    _ => None,
                })
                .collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.table = Table::with_capacity(self.policy, self.capacity);
        self.count = 0;
        self.last_trace = Trace::default();
    }

    pub fn last_trace(&self) -> &Trace<Snapshot<V>> {
        &self.last_trace
    }

    pub fn take_trace(&mut self) -> Trace<Snapshot<V>> {
        std::mem::take(&mut self.last_trace)
    }
}
