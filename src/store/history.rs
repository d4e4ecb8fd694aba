//! Bounded, newest-first history list
//!
//! New items are prepended; once the list grows past its capacity the oldest
//! item (at the back) is evicted. The capacity bound holds after every insert.

use std::collections::VecDeque;

/// Result of an [`BoundedHistory::upsert_by`] call
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert<T> {
    /// An existing item matched and was replaced in place
    Replaced,
    /// No item matched; the new item was prepended, possibly evicting the oldest
    Inserted { evicted: Option<T> },
}

#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Prepend an item, returning the evicted oldest item when over capacity.
    pub fn push_front(&mut self, item: T) -> Option<T> {
        self.items.push_front(item);
        if self.items.len() > self.capacity {
            self.items.pop_back()
        } else {
            None
        }
    }

    /// Replace the first item matching `matches` in place, or prepend `item`.
    pub fn upsert_by<F>(&mut self, item: T, matches: F) -> Upsert<T>
    where
        F: Fn(&T) -> bool,
    {
        match self.items.iter_mut().find(|existing| matches(existing)) {
            Some(slot) => {
                *slot = item;
                Upsert::Replaced
            }
            None => Upsert::Inserted {
                evicted: self.push_front(item),
            },
        }
    }

    pub fn find<F>(&self, matches: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| matches(item))
    }

    pub fn find_mut<F>(&mut self, matches: F) -> Option<&mut T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter_mut().find(|item| matches(item))
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> BoundedHistory<T> {
    /// Owned copy of the list, newest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
