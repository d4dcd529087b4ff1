//! LRU List Module
//!
//! Arena-backed doubly-linked list that keeps cached values in recency order.
//!
//! - Front (head) = Most recently used
//! - Back (tail) = Least recently used
//!
//! Nodes live in a `Vec` and link to each other by slot index. Freed slots
//! are recycled through a free list; each slot carries a generation that is
//! bumped on release, so a stale `Handle` never resolves to a newer value.

use std::collections::TryReserveError;

/// Sentinel for a missing link.
const NIL: usize = usize::MAX;

// == Handle ==
/// Stable reference to a value in an `LruList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    generation: u64,
    prev: usize,
    next: usize,
}

// == LRU List ==
/// Recency-ordered list with O(1) push, promote, remove and tail eviction.
#[derive(Debug)]
pub struct LruList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Length ==
    /// Returns the number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Try Reserve ==
    /// Makes sure the next `additional` pushes, and removing any number of
    /// values already in the list, will not allocate.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let needed = additional.saturating_sub(self.free.len());
        self.slots.try_reserve(needed)?;
        // Every live slot may land on the free list before the next push
        self.free.try_reserve(self.slots.len() - self.free.len())
    }

    // == Push Front ==
    /// Inserts a value as most recently used and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].value = Some(value);
                index
            }
            None => {
                self.slots.push(Slot {
                    value: Some(value),
                    generation: 0,
                    prev: NIL,
                    next: NIL,
                });
                self.slots.len() - 1
            }
        };

        self.attach_front(index);
        self.len += 1;

        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    // == Get ==
    /// Returns the value behind a handle, None if it has been removed.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slot(handle).and_then(|slot| slot.value.as_ref())
    }

    /// Mutable variant of `get`.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(slot) if slot.generation == handle.generation => slot.value.as_mut(),
            _ => None,
        }
    }

    // == Contains ==
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    // == Move To Front ==
    /// Marks a value as most recently used.
    ///
    /// Returns false if the handle is stale.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        if self.head != handle.index {
            self.detach(handle.index);
            self.attach_front(handle.index);
        }
        true
    }

    // == Remove ==
    /// Removes and returns the value behind a handle.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        self.detach(handle.index);

        let slot = &mut self.slots[handle.index];
        let value = slot.value.take();
        slot.generation += 1;
        self.free.push(handle.index);
        self.len -= 1;
        value
    }

    // == Back ==
    /// Handle of the least recently used value.
    pub fn back(&self) -> Option<Handle> {
        self.handle_at(self.tail)
    }

    // == Clear ==
    /// Drops every value. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation += 1;
            }
            slot.prev = NIL;
            slot.next = NIL;
            self.free.push(index);
        }
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
    }

    fn handle_at(&self, index: usize) -> Option<Handle> {
        if index == NIL {
            return None;
        }
        Some(Handle {
            index,
            generation: self.slots[index].generation,
        })
    }

    fn detach(&mut self, index: usize) {
        let prev = self.slots[index].prev;
        let next = self.slots[index].next;

        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.slots[index].prev = NIL;
        self.slots[index].next = NIL;
    }

    fn attach_front(&mut self, index: usize) {
        self.slots[index].prev = NIL;
        self.slots[index].next = self.head;

        if self.head != NIL {
            self.slots[self.head].prev = index;
        }
        self.head = index;

        if self.tail == NIL {
            self.tail = index;
        }
    }
}

// == Iterator ==
/// Front-to-back iterator yielding handles with their values.
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let index = self.cursor;
        let slot = &self.list.slots[index];
        self.cursor = slot.next;
        self.remaining -= 1;

        let handle = Handle {
            index,
            generation: slot.generation,
        };
        slot.value.as_ref().map(|value| (handle, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &LruList<&'static str>) -> Vec<&'static str> {
        list.iter().map(|(_, value)| *value).collect()
    }

    #[test]
    fn test_lru_new() {
        let list: LruList<&str> = LruList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.back().is_none());
    }

    #[test]
    fn test_lru_push_front_order() {
        let mut list = LruList::new();

        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(list.len(), 3);
        assert_eq!(order(&list), vec!["c", "b", "a"]);
        assert_eq!(list.get(list.back().unwrap()), Some(&"a"));
    }

    #[test]
    fn test_lru_move_to_front() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert!(list.move_to_front(a));
        assert_eq!(order(&list), vec!["a", "c", "b"]);

        // Already at head
        assert!(list.move_to_front(a));
        assert_eq!(order(&list), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_lru_remove_back_drains_in_order() {
        let mut list = LruList::new();

        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        let mut drained = Vec::new();
        while let Some(handle) = list.back() {
            drained.push(list.remove(handle).unwrap());
        }

        assert_eq!(drained, vec!["a", "b", "c"]);
        assert!(list.is_empty());
        assert!(list.back().is_none());
    }

    #[test]
    fn test_lru_try_reserve_covers_free_list() {
        let mut list = LruList::new();
        let handles: Vec<Handle> = (0..8).map(|i| list.push_front(i)).collect();

        list.try_reserve(1).unwrap();
        let free_capacity = list.free.capacity();
        let slot_capacity = list.slots.capacity();

        for handle in handles {
            list.remove(handle);
        }
        list.push_front(99);

        assert_eq!(list.free.capacity(), free_capacity);
        assert_eq!(list.slots.capacity(), slot_capacity);
    }

    #[test]
    fn test_lru_remove_middle() {
        let mut list = LruList::new();

        list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.len(), 2);
        assert_eq!(order(&list), vec!["c", "a"]);
        assert!(!list.contains(b));
    }

    #[test]
    fn test_lru_stale_handle_after_reuse() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        list.remove(a);
        let b = list.push_front("b");

        // Slot is recycled but the old handle must not see the new value
        assert_eq!(list.get(a), None);
        assert_eq!(list.remove(a), None);
        assert!(!list.move_to_front(a));
        assert_eq!(list.get(b), Some(&"b"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_lru_clear_invalidates_handles() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.clear();

        assert!(list.is_empty());
        assert!(list.get(a).is_none());
        assert_eq!(order(&list), Vec::<&str>::new());

        list.push_front("c");
        list.push_front("d");
        assert_eq!(order(&list), vec!["d", "c"]);
        assert!(list.get(a).is_none());
    }

    #[test]
    fn test_lru_get_mut() {
        let mut list = LruList::new();

        let a = list.push_front(1);
        *list.get_mut(a).unwrap() += 41;

        assert_eq!(list.get(a), Some(&42));
    }

    #[test]
    fn test_lru_try_reserve_uses_free_slots() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        list.remove(a);

        assert!(list.try_reserve(1).is_ok());
        assert!(list.try_reserve(usize::MAX).is_err());
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        assert_eq!(order(&list), vec!["b", "c", "a"]);
        assert_eq!(list.get(list.back().unwrap()), Some(&"a"));
    }
}
