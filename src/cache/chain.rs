//! Recency Chain Module
//!
//! Doubly linked list of cache entries ordered by write recency.

use crate::cache::{Entry, EntryId};

// == Recency Chain ==
/// Arena-backed doubly linked list of entries.
///
/// - Head = least recently touched (next eviction candidate)
/// - Tail = most recently touched
///
/// Entries live in slots addressed by [`EntryId`]; `prev`/`next` links are
/// slot handles, and slots freed by removal are reused by later inserts.
#[derive(Debug, Default)]
pub struct RecencyChain {
    /// Entry storage, `None` marks a free slot
    slots: Vec<Option<Entry>>,
    /// Free slot indices available for reuse
    free: Vec<usize>,
    /// Least recently touched entry
    head: Option<EntryId>,
    /// Most recently touched entry
    tail: Option<EntryId>,
    /// Number of linked entries
    len: usize,
}

impl RecencyChain {
    // == Constructor ==
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of entries in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the least recently touched entry.
    #[cfg(test)]
    pub(crate) fn head(&self) -> Option<EntryId> {
        self.head
    }

    /// Handle of the most recently touched entry.
    #[cfg(test)]
    pub(crate) fn tail(&self) -> Option<EntryId> {
        self.tail
    }

    // == Access ==
    /// Returns the entry behind `id`, if the slot is occupied.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Returns the entry behind `id` mutably, if the slot is occupied.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    // == Push Tail ==
    /// Appends `entry` as the new tail and returns its handle.
    pub fn push_tail(&mut self, entry: Entry) -> EntryId {
        let id = self.alloc(entry);
        self.attach_tail(id);
        self.len += 1;
        id
    }

    // == Pop Head ==
    /// Unlinks and returns the least recently touched entry.
    ///
    /// Returns None if the chain is empty.
    pub fn pop_head(&mut self) -> Option<Entry> {
        let head = self.head?;
        self.remove(head)
    }

    // == Remove ==
    /// Unlinks the entry behind `id` from any position and returns it.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        self.get(id)?;

        self.unlink(id);
        let entry = self.slots[id.0].take();
        self.free.push(id.0);
        self.len -= 1;
        entry
    }

    // == Move To Tail ==
    /// Relocates an entry to the most recently touched position.
    ///
    /// A no-op if the entry is already the tail or `id` is vacant.
    pub fn move_to_tail(&mut self, id: EntryId) {
        if self.tail == Some(id) || self.get(id).is_none() {
            return;
        }

        self.unlink(id);
        self.attach_tail(id);
    }

    fn alloc(&mut self, entry: Entry) -> EntryId {
        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(entry);
            EntryId(idx)
        } else {
            self.slots.push(Some(entry));
            EntryId(self.slots.len() - 1)
        }
    }

    /// Links a detached entry after the current tail.
    fn attach_tail(&mut self, id: EntryId) {
        let old_tail = self.tail;

        if let Some(entry) = self.get_mut(id) {
            entry.prev = old_tail;
            entry.next = None;
        }

        match old_tail {
            Some(tail_id) => {
                if let Some(tail) = self.get_mut(tail_id) {
                    tail.next = Some(id);
                }
            }
            None => {
                self.head = Some(id);
            }
        }

        self.tail = Some(id);
    }

    /// Detaches an entry, joining its neighbours (or moving head/tail).
    fn unlink(&mut self, id: EntryId) {
        let (prev, next) = match self.get_mut(id) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_entry) = self.get_mut(prev_id) {
                    prev_entry.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_id) => {
                if let Some(next_entry) = self.get_mut(next_id) {
                    next_entry.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    // == Walks ==
    /// Keys from head to tail, following `next` links.
    #[cfg(test)]
    pub(crate) fn keys_forward(&self) -> Vec<Vec<u8>> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let entry = self.get(id).expect("dangling next link");
            keys.push(entry.key().to_vec());
            cursor = entry.next;
        }
        keys
    }

    /// Keys from tail to head, following `prev` links.
    #[cfg(test)]
    pub(crate) fn keys_backward(&self) -> Vec<Vec<u8>> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            let entry = self.get(id).expect("dangling prev link");
            keys.push(entry.key().to_vec());
            cursor = entry.prev;
        }
        keys
    }

    /// Asserts the structural invariants of the list.
    #[cfg(test)]
    pub(crate) fn assert_linked(&self) {
        let forward = self.keys_forward();
        let mut backward = self.keys_backward();
        backward.reverse();

        assert_eq!(forward.len(), self.len, "forward walk length");
        assert_eq!(forward, backward, "forward and backward walks disagree");

        if let Some(head) = self.head {
            assert!(self.get(head).and_then(|e| e.prev).is_none(), "head has prev");
        }
        if let Some(tail) = self.tail {
            assert!(self.get(tail).and_then(|e| e.next).is_none(), "tail has next");
        }
        assert_eq!(self.head.is_none(), self.tail.is_none());
    }
}
