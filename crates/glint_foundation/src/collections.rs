//! Shared, mutable collections backing [`Value::List`] and [`Value::Map`].
//!
//! Both are reference handles: cloning a handle aliases the same storage, so a
//! mutation through one binding is visible through every other. Storage uses
//! the `im` crate's persistent structures, which makes taking a snapshot O(1).
//! Operations iterate over snapshots rather than over the live storage, so a
//! callback that reaches back into the same collection never trips a
//! `RefCell` borrow conflict.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::equality::{deep_equal, slot_hash};
use crate::value::Value;

/// Ordered, mutable list of values with reference semantics.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<im::Vector<Value>>>);

impl List {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns true if both handles point at the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared storage, stable while any handle is alive.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Gets a copy of the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Returns a point-in-time copy of the contents (O(1)).
    #[must_use]
    pub fn snapshot(&self) -> im::Vector<Value> {
        self.0.borrow().clone()
    }

    /// Replaces the whole contents.
    pub fn replace_contents(&self, items: im::Vector<Value>) {
        *self.0.borrow_mut() = items;
    }

    /// Appends a value.
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push_back(value);
    }

    /// Removes and returns the last element.
    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop_back()
    }

    /// Removes and returns the first element.
    pub fn pull(&self) -> Option<Value> {
        self.0.borrow_mut().pop_front()
    }

    /// Inserts a value before `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`; callers validate with `check_range` first.
    pub fn insert(&self, index: usize, value: Value) {
        self.0.borrow_mut().insert(index, value);
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`; callers normalize the index first.
    pub fn remove(&self, index: usize) -> Value {
        self.0.borrow_mut().remove(index)
    }

    /// Swaps two elements in place.
    pub fn swap(&self, a: usize, b: usize) {
        self.0.borrow_mut().swap(a, b);
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

impl From<im::Vector<Value>> for List {
    fn from(items: im::Vector<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::List(self.clone()), f)
    }
}

/// Insertion-ordered, mutable map keyed by deep equality.
///
/// Two keys address the same slot iff [`deep_equal`] holds between them.
/// Entries are stored under an ever-increasing insertion sequence number so
/// iteration follows first-insertion order; overwriting an existing key keeps
/// its position.
#[derive(Clone, Default)]
pub struct Map(Rc<RefCell<MapStore>>);

#[derive(Clone, Default)]
struct MapStore {
    entries: im::OrdMap<u64, (Value, Value)>,
    slots: HashMap<i32, Vec<u64>>,
    next_seq: u64,
}

impl MapStore {
    fn find(&self, key: &Value) -> Option<u64> {
        let bucket = self.slots.get(&slot_hash(key))?;
        bucket
            .iter()
            .copied()
            .find(|seq| self.entries.get(seq).is_some_and(|(k, _)| deep_equal(k, key)))
    }

    fn unlink(&mut self, seq: u64) -> Option<(Value, Value)> {
        let (key, value) = self.entries.remove(&seq)?;
        let slot = slot_hash(&key);
        if let Some(bucket) = self.slots.get_mut(&slot) {
            bucket.retain(|s| *s != seq);
            if bucket.is_empty() {
                self.slots.remove(&slot);
            }
        }
        Some((key, value))
    }
}

impl Map {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().entries.is_empty()
    }

    /// Returns true if both handles point at the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared storage, stable while any handle is alive.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Returns true if a deep-equal key is present.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.borrow().find(key).is_some()
    }

    /// Gets a copy of the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<Value> {
        let store = self.0.borrow();
        let seq = store.find(key)?;
        store.entries.get(&seq).map(|(_, v)| v.clone())
    }

    /// Inserts or overwrites an entry, returning the previous value.
    pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
        let existing = self.0.borrow().find(&key);
        let mut store = self.0.borrow_mut();
        if let Some(seq) = existing {
            let entry = store.entries.get_mut(&seq)?;
            return Some(std::mem::replace(&mut entry.1, value));
        }
        let seq = store.next_seq;
        store.next_seq += 1;
        store.slots.entry(slot_hash(&key)).or_default().push(seq);
        store.entries.insert(seq, (key, value));
        None
    }

    /// Removes the entry stored under `key`, returning its value.
    pub fn remove(&self, key: &Value) -> Option<Value> {
        let seq = self.0.borrow().find(key)?;
        self.0.borrow_mut().unlink(seq).map(|(_, v)| v)
    }

    /// Removes and returns the most recently inserted entry.
    pub fn pop_newest(&self) -> Option<(Value, Value)> {
        let mut store = self.0.borrow_mut();
        let seq = store.entries.get_max()?.0;
        store.unlink(seq)
    }

    /// Removes and returns the oldest entry.
    pub fn pop_oldest(&self) -> Option<(Value, Value)> {
        let mut store = self.0.borrow_mut();
        let seq = store.entries.get_min()?.0;
        store.unlink(seq)
    }

    /// Returns the entries in iteration order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Value, Value)> {
        let entries = self.0.borrow().entries.clone();
        entries.values().cloned().collect()
    }

    /// Returns the keys in iteration order.
    #[must_use]
    pub fn keys(&self) -> Vec<Value> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    /// Returns the values in iteration order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.entries().into_iter().map(|(_, v)| v).collect()
    }

    /// Assigns `values` to the existing keys, in iteration order.
    ///
    /// Extra values are ignored; keys beyond the supplied values keep theirs.
    pub fn assign_values(&self, values: Vec<Value>) {
        let mut store = self.0.borrow_mut();
        let seqs: Vec<u64> = store.entries.keys().copied().collect();
        for (seq, value) in seqs.into_iter().zip(values) {
            if let Some(entry) = store.entries.get_mut(&seq) {
                entry.1 = value;
            }
        }
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Map(self.clone()), f)
    }
}
