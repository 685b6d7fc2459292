//! Recency List Module
//!
//! Doubly-linked list of cache entries ordered by access recency.

use crate::cache::entry::{Entry, NIL};

// == Recency List ==
/// Arena-backed doubly-linked list giving O(1) splices.
///
/// Entries are stored in a `Vec` and linked by slot index:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// The list is the sole owner of its entries. Callers keep the slot index
/// returned by [`RecencyList::insert_front`] as a handle; it stays valid
/// until the entry is removed. Freed slots are recycled.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Insert Front ==
    /// Stores `entry` and links it as the most recently used node.
    ///
    /// Returns the slot handle of the new node.
    pub fn insert_front(&mut self, entry: Entry<K, V>) -> usize {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.link_front(slot);
        slot
    }

    // == Link Front ==
    /// Links an allocated, currently unlinked node at the head.
    ///
    /// If the list holds no linked nodes the node also becomes the tail.
    pub fn link_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(entry) = self.slot_mut(slot) {
            entry.prev = NIL;
            entry.next = old_head;
        } else {
            return;
        }

        match self.slot_mut(old_head) {
            Some(head) => head.prev = slot,
            None => self.tail = slot,
        }
        self.head = slot;
        self.len += 1;
    }

    // == Unlink ==
    /// Detaches a node from its neighbours without freeing it.
    ///
    /// If the node was the tail, the tail moves to its predecessor. The
    /// caller guarantees the node is currently linked exactly once.
    pub fn unlink(&mut self, slot: usize) {
        let (prev, next) = match self.slot_mut(slot) {
            Some(entry) => {
                let links = (entry.prev, entry.next);
                entry.prev = NIL;
                entry.next = NIL;
                links
            }
            None => return,
        };

        match self.slot_mut(prev) {
            Some(entry) => entry.next = next,
            None => self.head = next,
        }
        match self.slot_mut(next) {
            Some(entry) => entry.prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    // == Move To Front ==
    /// Promotes a linked node to most recently used.
    pub fn move_to_front(&mut self, slot: usize) {
        if self.head == slot {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    // == Remove ==
    /// Unlinks a node and frees its slot, returning the entry.
    pub fn remove(&mut self, slot: usize) -> Option<Entry<K, V>> {
        if self.get(slot).is_none() {
            return None;
        }
        self.unlink(slot);
        let entry = self.slots.get_mut(slot).and_then(Option::take);
        self.free.push(slot);
        entry
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        self.remove(self.tail)
    }

    // == Back ==
    /// Returns the least recently used entry without removing it.
    pub fn back(&self) -> Option<&Entry<K, V>> {
        self.get(self.tail)
    }

    // == Front ==
    /// Returns the most recently used entry.
    pub fn front(&self) -> Option<&Entry<K, V>> {
        self.get(self.head)
    }

    /// Returns the entry stored in `slot`.
    pub fn get(&self, slot: usize) -> Option<&Entry<K, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, slot: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    // == Iter ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // == Clear ==
    /// Drops every entry and releases the slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// == Iterator ==
/// Iterator over a [`RecencyList`], MRU first.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor)?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
