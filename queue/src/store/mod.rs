//! Slot layouts backing a [crate::Queue].
//!
//! Both layouts keep every allocated slot for the lifetime of the queue. Positions `[0, len)`
//! are occupied by elements (tracked by the queue), positions `[len, capacity)` are reserved.

mod array;
mod list;

pub(crate) use array::Array;
pub(crate) use list::List;

use crate::{Item, StorageMode};
use std::collections::TryReserveError;

/// Operations shared by both slot layouts.
///
/// Callers guarantee every position is below `capacity()`.
pub(crate) trait Store {
    /// Number of allocated slots.
    fn capacity(&self) -> usize;

    /// Allocate one reserved slot after all existing slots.
    fn grow(&mut self) -> Result<(), TryReserveError>;

    /// Returns the item stored at `pos`.
    fn slot(&self, pos: usize) -> Option<&Item>;

    /// Returns the slot at `pos`.
    fn slot_mut(&mut self, pos: usize) -> &mut Option<Item>;

    /// Move the slot at `pos` behind the first `len` slots, closing the gap it leaves.
    fn retire(&mut self, pos: usize, len: usize);

    /// Move the slot at `src` to `dest`, shifting the slots in between by one.
    fn relocate(&mut self, dest: usize, src: usize);

    /// Exchange the items stored at `a` and `b`.
    fn swap(&mut self, a: usize, b: usize);
}

/// Slot layout selected by [StorageMode].
pub(crate) enum Backing {
    Array(Array),
    List(List),
}

impl Backing {
    pub fn new(mode: StorageMode) -> Self {
        match mode {
            StorageMode::Array => Self::Array(Array::default()),
            StorageMode::LinkedList => Self::List(List::default()),
        }
    }

    pub fn mode(&self) -> StorageMode {
        match self {
            Self::Array(_) => StorageMode::Array,
            Self::List(_) => StorageMode::LinkedList,
        }
    }

    pub fn store(&self) -> &dyn Store {
        match self {
            Self::Array(array) => array,
            Self::List(list) => list,
        }
    }

    pub fn store_mut(&mut self) -> &mut dyn Store {
        match self {
            Self::Array(array) => array,
            Self::List(list) => list,
        }
    }

    /// Iterate over the first `len` items.
    pub fn iter(&self, len: usize) -> Iter<'_> {
        let inner = match self {
            Self::Array(array) => Inner::Array(array.iter(len)),
            Self::List(list) => Inner::List(list.iter(len)),
        };
        Iter { inner }
    }
}

/// Iterator over the elements of a [crate::Queue], in position order.
pub struct Iter<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Array(array::Iter<'a>),
    List(list::Iter<'a>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Array(iter) => iter.next(),
            Inner::List(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Array(iter) => iter.size_hint(),
            Inner::List(iter) => iter.size_hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn items(backing: &Backing, len: usize) -> Vec<u8> {
        backing.iter(len).map(|item| item[0]).collect()
    }

    fn fill(backing: &mut Backing, values: &[u8]) {
        for (pos, value) in values.iter().enumerate() {
            let store = backing.store_mut();
            store.grow().unwrap();
            *store.slot_mut(pos) = Some(Item::new(&[*value]));
        }
    }

    #[test_case(StorageMode::Array; "array")]
    #[test_case(StorageMode::LinkedList; "linked list")]
    fn test_store_grow(mode: StorageMode) {
        let mut backing = Backing::new(mode);
        assert_eq!(backing.mode(), mode);
        assert_eq!(backing.store().capacity(), 0);
        fill(&mut backing, b"abc");
        assert_eq!(backing.store().capacity(), 3);
        assert_eq!(items(&backing, 3), b"abc");
        assert_eq!(backing.store().slot(1).unwrap()[0], b'b');
    }

    #[test_case(StorageMode::Array; "array")]
    #[test_case(StorageMode::LinkedList; "linked list")]
    fn test_store_retire(mode: StorageMode) {
        let mut backing = Backing::new(mode);
        fill(&mut backing, b"abcde");

        // Retired slot lands behind the remaining elements
        backing.store_mut().retire(1, 5);
        assert_eq!(items(&backing, 4), b"acde");
        assert_eq!(backing.store().slot(4).unwrap()[0], b'b');

        // Retiring the last element is a no-op on order
        backing.store_mut().retire(3, 4);
        assert_eq!(items(&backing, 3), b"acd");
        assert_eq!(backing.store().capacity(), 5);
    }

    #[test_case(StorageMode::Array; "array")]
    #[test_case(StorageMode::LinkedList; "linked list")]
    fn test_store_relocate(mode: StorageMode) {
        let mut backing = Backing::new(mode);
        fill(&mut backing, b"abcdef");

        // Backward
        backing.store_mut().relocate(1, 4);
        assert_eq!(items(&backing, 6), b"aebcdf");

        // Forward
        backing.store_mut().relocate(4, 1);
        assert_eq!(items(&backing, 6), b"abcdef");

        // Ends
        backing.store_mut().relocate(5, 0);
        assert_eq!(items(&backing, 6), b"bcdefa");
        backing.store_mut().relocate(0, 5);
        assert_eq!(items(&backing, 6), b"abcdef");
    }

    #[test_case(StorageMode::Array; "array")]
    #[test_case(StorageMode::LinkedList; "linked list")]
    fn test_store_swap(mode: StorageMode) {
        let mut backing = Backing::new(mode);
        fill(&mut backing, b"abcd");
        backing.store_mut().swap(0, 3);
        assert_eq!(items(&backing, 4), b"dbca");
        backing.store_mut().swap(2, 1);
        assert_eq!(items(&backing, 4), b"dcba");
    }
}
