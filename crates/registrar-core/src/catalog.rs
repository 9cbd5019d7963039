//! Registry store.
//!
//! Owns the authoritative ID -> record mapping for each entity kind. Tables
//! are ordered by ID so iteration (and everything derived from it, like
//! reports and snapshots) is deterministic. The catalog knows nothing about
//! enrollments; cascade cleanup is the registrar's job.

use std::collections::{BTreeMap, btree_map::Entry};

use crate::{
    entity::{Course, Student, Teacher},
    id::{CourseId, StudentId, TeacherId},
};

/// A single keyed collection of records.
#[derive(Debug, Clone)]
pub struct Table<K, V> {
    rows: BTreeMap<K, V>,
}

impl<K: Ord, V> Table<K, V> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { rows: BTreeMap::new() }
    }

    /// Insert a record under a fresh key.
    ///
    /// Returns `false` and leaves the table untouched if the key is taken.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.rows.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            },
        }
    }

    /// Look up a record.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    /// Remove and return a record.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.rows.remove(key)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.values()
    }
}

impl<K: Ord, V> Default for Table<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// All entity tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Students keyed by ID.
    pub students: Table<StudentId, Student>,
    /// Courses keyed by ID.
    pub courses: Table<CourseId, Course>,
    /// Teachers keyed by ID.
    pub teachers: Table<TeacherId, Teacher>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }
}
