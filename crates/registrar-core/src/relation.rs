//! Bidirectional many-to-many relation.
//!
//! A single object owns both directions of an association, so every write
//! touches both sides in one place. Each pair also carries the sequence
//! number of the `link` that created it; that gives a global order from
//! which both per-side orders can be replayed exactly.
//!
//! # Invariants
//!
//! - Mirror: `r ∈ rights(l) ⇔ l ∈ lefts(r) ⇔ (l, r) ∈ pairs`
//! - No duplicates: a pair is linked at most once
//! - Stable order: each side lists partners in link order, and `unlink`
//!   never reorders the survivors

use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    hash::Hash,
};

/// Defect found by [`Relation::audit`]. Only reachable through a bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationDefect {
    /// The pair is recorded on one side but not the other.
    Asymmetric {
        /// Left endpoint.
        left: String,
        /// Right endpoint.
        right: String,
    },
    /// The pair appears more than once on one side.
    Duplicate {
        /// Left endpoint.
        left: String,
        /// Right endpoint.
        right: String,
    },
}

/// Many-to-many association between `L` and `R` keys.
#[derive(Debug, Clone)]
pub struct Relation<L, R> {
    forward: HashMap<L, Vec<R>>,
    backward: HashMap<R, Vec<L>>,
    /// Link sequence number per pair.
    seq: HashMap<(L, R), u64>,
    next_seq: u64,
}

impl<L, R> Relation<L, R>
where
    L: Clone + Eq + Hash + Display,
    R: Clone + Eq + Hash + Display,
{
    /// Create an empty relation.
    pub fn new() -> Self {
        Self { forward: HashMap::new(), backward: HashMap::new(), seq: HashMap::new(), next_seq: 0 }
    }

    /// Number of linked pairs.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Whether no pairs are linked.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Check whether `(left, right)` is linked.
    pub fn contains(&self, left: &L, right: &R) -> bool {
        self.seq.contains_key(&(left.clone(), right.clone()))
    }

    /// Partners of `left`, in link order.
    pub fn rights(&self, left: &L) -> &[R] {
        self.forward.get(left).map_or(&[], Vec::as_slice)
    }

    /// Partners of `right`, in link order.
    pub fn lefts(&self, right: &R) -> &[L] {
        self.backward.get(right).map_or(&[], Vec::as_slice)
    }

    /// Link a pair. Returns `false` if it was already linked.
    pub fn link(&mut self, left: L, right: R) -> bool {
        let key = (left, right);
        if self.seq.contains_key(&key) {
            return false;
        }

        let (left, right) = key;
        self.forward.entry(left.clone()).or_default().push(right.clone());
        self.backward.entry(right.clone()).or_default().push(left.clone());
        self.seq.insert((left, right), self.next_seq);
        self.next_seq += 1;

        true
    }

    /// Unlink a pair. Returns `false` if it wasn't linked.
    pub fn unlink(&mut self, left: &L, right: &R) -> bool {
        if self.seq.remove(&(left.clone(), right.clone())).is_none() {
            return false;
        }

        detach(&mut self.forward, left, right);
        detach(&mut self.backward, right, left);

        true
    }

    /// Remove every pair with this left endpoint. Returns the former
    /// partners in link order. Idempotent.
    pub fn remove_left(&mut self, left: &L) -> Vec<R> {
        let partners = self.forward.remove(left).unwrap_or_default();
        for right in &partners {
            detach(&mut self.backward, right, left);
            self.seq.remove(&(left.clone(), right.clone()));
        }
        partners
    }

    /// Remove every pair with this right endpoint. Returns the former
    /// partners in link order. Idempotent.
    pub fn remove_right(&mut self, right: &R) -> Vec<L> {
        let partners = self.backward.remove(right).unwrap_or_default();
        for left in &partners {
            detach(&mut self.forward, left, right);
            self.seq.remove(&(left.clone(), right.clone()));
        }
        partners
    }

    /// All pairs in global link order.
    ///
    /// Linking them in this order into an empty relation reproduces the
    /// per-side ordering of this one.
    pub fn pairs(&self) -> Vec<(L, R)> {
        let mut ordered: Vec<_> = self.seq.iter().map(|(pair, seq)| (*seq, pair)).collect();
        ordered.sort_unstable_by_key(|(seq, _)| *seq);
        ordered.into_iter().map(|(_, pair)| pair.clone()).collect()
    }

    /// Left keys that currently have at least one partner.
    pub fn left_keys(&self) -> impl Iterator<Item = &L> {
        self.forward.keys()
    }

    /// Right keys that currently have at least one partner.
    pub fn right_keys(&self) -> impl Iterator<Item = &R> {
        self.backward.keys()
    }

    /// Verify the mirror and no-duplicate invariants.
    pub fn audit(&self) -> Result<(), RelationDefect> {
        for (left, rights) in &self.forward {
            let mut seen = HashSet::with_capacity(rights.len());
            for right in rights {
                if !seen.insert(right) {
                    return Err(RelationDefect::Duplicate {
                        left: left.to_string(),
                        right: right.to_string(),
                    });
                }
                if !self.lefts(right).contains(left)
                    || !self.seq.contains_key(&(left.clone(), right.clone()))
                {
                    return Err(RelationDefect::Asymmetric {
                        left: left.to_string(),
                        right: right.to_string(),
                    });
                }
            }
        }

        for (right, lefts) in &self.backward {
            let mut seen = HashSet::with_capacity(lefts.len());
            for left in lefts {
                if !seen.insert(left) {
                    return Err(RelationDefect::Duplicate {
                        left: left.to_string(),
                        right: right.to_string(),
                    });
                }
                if !self.rights(left).contains(right) {
                    return Err(RelationDefect::Asymmetric {
                        left: left.to_string(),
                        right: right.to_string(),
                    });
                }
            }
        }

        if let Some((left, right)) = self.seq.keys().find(|(l, r)| !self.rights(l).contains(r)) {
            return Err(RelationDefect::Asymmetric { left: left.to_string(), right: right.to_string() });
        }

        Ok(())
    }

    /// Whether both directions mirror each other. Full scan, meant for
    /// `debug_assert!` and tests.
    pub fn is_consistent(&self) -> bool {
        self.audit().is_ok()
    }
}

impl<L, R> Default for Relation<L, R>
where
    L: Clone + Eq + Hash + Display,
    R: Clone + Eq + Hash + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Remove `value` from the list under `key`, dropping the list once empty.
fn detach<K, V>(index: &mut HashMap<K, Vec<V>>, key: &K, value: &V)
where
    K: Eq + Hash,
    V: Eq,
{
    if let Some(list) = index.get_mut(key) {
        list.retain(|v| v != value);
        if list.is_empty() {
            index.remove(key);
        }
    }
}
