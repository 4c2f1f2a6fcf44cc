//! Contiguous slot layout.

use super::Store;
use crate::Item;
use std::{collections::TryReserveError, iter::Flatten, slice};

/// Slots stored in a resizable index.
///
/// Removal and relocation rotate the affected range of the index, so every slot (and the buffer
/// it may retain) stays allocated.
#[derive(Default)]
pub(crate) struct Array {
    slots: Vec<Option<Item>>,
}

pub(crate) type Iter<'a> = Flatten<slice::Iter<'a, Option<Item>>>;

impl Array {
    pub fn iter(&self, len: usize) -> Iter<'_> {
        self.slots[..len].iter().flatten()
    }
}

impl Store for Array {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn grow(&mut self) -> Result<(), TryReserveError> {
        // Grow by exactly one slot (never ahead of need)
        self.slots.try_reserve_exact(1)?;
        self.slots.push(None);
        Ok(())
    }

    fn slot(&self, pos: usize) -> Option<&Item> {
        self.slots[pos].as_ref()
    }

    fn slot_mut(&mut self, pos: usize) -> &mut Option<Item> {
        &mut self.slots[pos]
    }

    fn retire(&mut self, pos: usize, len: usize) {
        self.slots[pos..len].rotate_left(1);
    }

    fn relocate(&mut self, dest: usize, src: usize) {
        if src > dest {
            self.slots[dest..=src].rotate_right(1);
        } else {
            self.slots[src..=dest].rotate_left(1);
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }
}
