//! Binary heap whose entries can be looked up, replaced and removed by key.
//!
//! Entries live in an `IndexMap` keyed by the caller-derived key. The heap itself is a dense
//! vector of slots into that map, and every entry remembers its own position in the vector. The
//! two structures are only ever reordered through a single `swap` primitive, which keeps both
//! sides in agreement.
use crate::config::HeapConfig;
use crate::error::HeapError;
use crate::prelude::*;
use std::fmt;

/// Boxed key derivation function, the default for [`IndexedHeap`].
pub type KeyFn<T, K = String> = Box<dyn Fn(&T) -> Result<K> + Send + Sync>;

/// Boxed ordering function, the default for [`IndexedHeap`].
pub type LessFn<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

struct Entry<T> {
    object: T,
    position: usize, // Index into `IndexedHeap::queue`.
}

/// Priority queue over objects of type `T` that are identified by a key of type `K`.
///
/// The object for which `less` holds against all others is at the head of the queue. Use a
/// reversed `less` to get a max-heap.
pub struct IndexedHeap<T, K = String, F = KeyFn<T, K>, L = LessFn<T>> {
    entries: IndexMap<K, Entry<T>>,
    queue: Vec<usize>, // Slots of `entries` in heap order.
    key_of: F,
    less: L,
}

impl<T, K> IndexedHeap<T, K>
where
    K: Hash + Eq,
{
    /// Create a heap that stores boxed versions of the given functions. The resulting type can
    /// be named as `IndexedHeap<T, K>`.
    pub fn boxed<F, L>(key_of: F, less: L) -> Self
    where
        F: Fn(&T) -> Result<K> + Send + Sync + 'static,
        L: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self::new(Box::new(key_of), Box::new(less))
    }
}

impl<T, K, F, L> IndexedHeap<T, K, F, L>
where
    K: Hash + Eq,
    F: Fn(&T) -> Result<K>,
    L: Fn(&T, &T) -> bool,
{
    /// Create an empty heap.
    ///
    /// `key_of` must return the same key for the same object for as long as it is stored.
    /// `less` must be a strict weak order (irreflexive and transitive). Neither is checked;
    /// restoring the order after a replacement assumes an element never needs to move both up
    /// and down, which only holds under that precondition.
    pub fn new(key_of: F, less: L) -> Self {
        Self::with_capacity(0, key_of, less)
    }

    pub fn with_capacity(capacity: usize, key_of: F, less: L) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, default()),
            queue: Vec::with_capacity(capacity),
            key_of,
            less,
        }
    }

    pub fn with_config(config: &HeapConfig, key_of: F, less: L) -> Self {
        Self::with_capacity(config.initial_capacity, key_of, less)
    }

    /// Insert `object`, or replace the object stored under the same key. Returns the replaced
    /// object, if any.
    pub fn add(&mut self, object: T) -> Result<Option<T>, HeapError<T>> {
        let (key, object) = self.key_for(object)?;

        if let Some(entry) = self.entries.get_mut(&key) {
            let old = replace(&mut entry.object, object);
            let position = entry.position;

            trace!("replacing object at position {} of {}", position, self.len());
            self.fix(position);
            Ok(Some(old))
        } else {
            self.push_entry(key, object);
            Ok(None)
        }
    }

    /// Insert `object` unless an object with the same key is already stored, in which case the
    /// stored object is kept. Returns whether `object` was inserted.
    pub fn add_if_not_present(&mut self, object: T) -> Result<bool, HeapError<T>> {
        let (key, object) = self.key_for(object)?;

        if self.entries.contains_key(&key) {
            return Ok(false);
        }

        self.push_entry(key, object);
        Ok(true)
    }

    /// Same as [`add`](Self::add).
    pub fn update(&mut self, object: T) -> Result<Option<T>, HeapError<T>> {
        self.add(object)
    }

    /// Remove the object stored under the key of `object` and return it.
    pub fn delete<'a>(&mut self, object: &'a T) -> Result<T, HeapError<&'a T>> {
        let (key, _) = self.key_for(object)?;
        let position = match self.entries.get(&key) {
            Some(entry) => entry.position,
            None => return Err(HeapError::NotFound),
        };

        self.remove_at(position).ok_or(HeapError::NotFound)
    }

    pub fn delete_by_key<Q>(&mut self, key: &Q) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.entries.get(key)?.position;
        self.remove_at(position)
    }

    /// Returns the head of the queue without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.queue.first().map(|&slot| &self.entries[slot].object)
    }

    /// Remove and return the head of the queue.
    pub fn pop(&mut self) -> Result<T, HeapError<T>> {
        self.remove_at(0).ok_or(HeapError::Empty)
    }

    /// Returns the object stored under the key of `object`.
    pub fn get<'a>(&self, object: &'a T) -> Result<Option<&T>, HeapError<&'a T>> {
        let (key, _) = self.key_for(object)?;
        Ok(self.get_by_key(&key))
    }

    pub fn get_by_key<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| &entry.object)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Snapshot of all stored objects. The order is arbitrary and is not the heap order.
    pub fn list(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Iterate over all stored objects in the same arbitrary order as [`list`](Self::list).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.values().map(|entry| &entry.object)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
    }

    /// Consume the heap and return its objects in pop order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len());
        while let Ok(object) = self.pop() {
            result.push(object);
        }
        result
    }

    fn key_for<O: Borrow<T>>(&self, object: O) -> Result<(K, O), HeapError<O>> {
        match (self.key_of)(object.borrow()) {
            Ok(key) => Ok((key, object)),
            Err(e) => Err(HeapError::key_derivation(object, e)),
        }
    }

    fn push_entry(&mut self, key: K, object: T) {
        let position = self.queue.len();
        let (slot, _) = self.entries.insert_full(key, Entry { object, position });
        self.queue.push(slot);

        let position = self.sift_up(position);
        trace!("inserted object at position {} of {}", position, self.len());
    }

    fn remove_at(&mut self, position: usize) -> Option<T> {
        let last = self.queue.len().checked_sub(1)?;
        if position > last {
            return None;
        }

        self.swap(position, last);
        let slot = self.queue.pop()?;
        let (_, entry) = self.entries.swap_remove_index(slot)?;

        // `swap_remove_index` moved the entry from the last slot into `slot`.
        if let Some(moved) = self.entries.get_index(slot).map(|(_, e)| e.position) {
            self.queue[moved] = slot;
        }

        if position < last {
            self.fix(position);
        }

        trace!("removed object at position {}, {} left", position, self.len());
        Some(entry.object)
    }

    fn less_at(&self, i: usize, j: usize) -> bool {
        let a = &self.entries[self.queue[i]].object;
        let b = &self.entries[self.queue[j]].object;
        (self.less)(a, b)
    }

    /// Exchange the entries at positions `i` and `j`. This is the only place where entries
    /// change position.
    fn swap(&mut self, i: usize, j: usize) {
        self.queue.swap(i, j);
        self.entries[self.queue[i]].position = i;
        self.entries[self.queue[j]].position = j;
    }

    /// Move the entry at `position` towards the root and return where it ended up.
    fn sift_up(&mut self, mut position: usize) -> usize {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.less_at(position, parent) {
                break;
            }

            self.swap(position, parent);
            position = parent;
        }

        position
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.queue.len();

        loop {
            let left = 2 * position + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let child = if right < len && self.less_at(right, left) {
                right
            } else {
                left
            };

            if !self.less_at(child, position) {
                break;
            }

            self.swap(position, child);
            position = child;
        }
    }

    fn fix(&mut self, position: usize) {
        if self.sift_up(position) == position {
            self.sift_down(position);
        }
    }
}

impl<T, K, F, L> fmt::Debug for IndexedHeap<T, K, F, L>
where
    T: fmt::Debug,
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Listed in heap order, so the head comes first.
        f.debug_map()
            .entries(
                self.queue
                    .iter()
                    .filter_map(|&slot| self.entries.get_index(slot))
                    .map(|(key, entry)| (key, &entry.object)),
            )
            .finish()
    }
}
