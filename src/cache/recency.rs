//! Recency List Module
//!
//! Slot arena with an intrusive doubly-linked recency order for O(1) LRU eviction.

use std::collections::TryReserveError;

// == Handle ==
/// Stable reference to a slot in a [`RecencyList`].
///
/// A handle stays valid until its value is removed; the slot may then be
/// reused by a later push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug)]
struct Slot<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Owns a set of values and orders them by recency.
///
/// Values live in a slot arena and are linked through slot indices:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Freed slots are recycled, so the arena never holds more slots than the
/// peak number of live values.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Slot<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Reserve ==
    /// Makes sure the next [`push_front`](Self::push_front) will not allocate.
    ///
    /// On error nothing has changed.
    pub fn try_reserve_slot(&mut self) -> Result<(), TryReserveError> {
        if !self.free.is_empty() {
            return Ok(());
        }
        self.slots.try_reserve(1)?;
        // Room to park every slot on the free list later, so removal never allocates
        let wanted = self.slots.len() + 1;
        self.free.try_reserve(wanted.saturating_sub(self.free.len()))?;
        Ok(())
    }

    // == Push Front ==
    /// Inserts a value as the most recently used and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let slot = Slot {
            value,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.link_mut(old_head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
        Handle(idx)
    }

    // == Touch ==
    /// Marks a value as recently used (moves it to the front).
    ///
    /// Unknown handles are ignored.
    pub fn touch(&mut self, handle: Handle) {
        if !self.is_live(handle.0) || self.head == Some(handle.0) {
            return;
        }
        self.unlink(handle.0);

        let idx = handle.0;
        let old_head = self.head;
        {
            let slot = self.link_mut(idx);
            slot.prev = None;
            slot.next = old_head;
        }
        match old_head {
            Some(h) => self.link_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    // == Remove ==
    /// Unlinks a value and hands ownership back to the caller.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.is_live(handle.0) {
            return None;
        }
        self.unlink(handle.0);
        let slot = self.slots[handle.0].take()?;
        self.free.push(handle.0);
        self.len -= 1;
        Some(slot.value)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(Handle(tail))
    }

    // == Peek Back ==
    /// Returns the least recently used value without removing it.
    pub fn peek_back(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.get(Handle(idx)))
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.0)
            .and_then(Option::as_ref)
            .map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.value)
    }

    /// Iterates values from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Clear ==
    /// Drops every value. Arena storage is kept for reuse.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots allocated in the arena, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn is_live(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Some(_)))
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = self.link_mut(idx);
            (slot.prev.take(), slot.next.take())
        };
        match prev {
            Some(p) => self.link_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.link_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    // Only called with indices reached through live links.
    fn link_mut(&mut self, idx: usize) -> &mut Slot<T> {
        match self.slots[idx].as_mut() {
            Some(slot) => slot,
            None => unreachable!("recency link points at an empty slot"),
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let slot = self.list.slots.get(idx)?.as_ref()?;
        self.cursor = slot.next;
        Some(&slot.value)
    }
}
