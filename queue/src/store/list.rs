//! Linked slot layout.

use super::Store;
use crate::Item;
use std::collections::TryReserveError;

/// A node of the list. Links are indices into [List::nodes].
#[derive(Default)]
struct Node {
    prev: Option<usize>,
    next: Option<usize>,
    item: Option<Item>,
}

/// Slots stored as a doubly-linked list of nodes allocated in an arena.
///
/// Nodes are never removed from the arena: a retired node is spliced to the tail of the list,
/// behind every reserved node, so the list always links all `capacity()` nodes.
#[derive(Default)]
pub(crate) struct List {
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl List {
    /// Returns the arena index of the node at `pos` (walking from the head).
    fn index(&self, pos: usize) -> usize {
        let mut cursor = self.head;
        for _ in 0..pos {
            cursor = cursor.and_then(|idx| self.nodes[idx].next);
        }
        cursor.unwrap_or_else(|| unreachable!("position {pos} beyond capacity"))
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    /// Link the detached node `idx` directly before `at`.
    fn link_before(&mut self, at: usize, idx: usize) {
        let prev = self.nodes[at].prev;
        self.nodes[idx].prev = prev;
        self.nodes[idx].next = Some(at);
        self.nodes[at].prev = Some(idx);
        match prev {
            Some(prev) => self.nodes[prev].next = Some(idx),
            None => self.head = Some(idx),
        }
    }

    /// Link the detached node `idx` directly after `at`.
    fn link_after(&mut self, at: usize, idx: usize) {
        let next = self.nodes[at].next;
        self.nodes[idx].prev = Some(at);
        self.nodes[idx].next = next;
        self.nodes[at].next = Some(idx);
        match next {
            Some(next) => self.nodes[next].prev = Some(idx),
            None => self.tail = Some(idx),
        }
    }

    /// Link the detached node `idx` at the tail.
    fn push_back(&mut self, idx: usize) {
        match self.tail {
            Some(tail) => self.link_after(tail, idx),
            None => {
                self.head = Some(idx);
                self.tail = Some(idx);
            }
        }
    }

    pub fn iter(&self, len: usize) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: len,
        }
    }
}

impl Store for List {
    fn capacity(&self) -> usize {
        self.nodes.len()
    }

    fn grow(&mut self) -> Result<(), TryReserveError> {
        self.nodes.try_reserve_exact(1)?;
        let idx = self.nodes.len();
        self.nodes.push(Node::default());
        self.push_back(idx);
        Ok(())
    }

    fn slot(&self, pos: usize) -> Option<&Item> {
        self.nodes[self.index(pos)].item.as_ref()
    }

    fn slot_mut(&mut self, pos: usize) -> &mut Option<Item> {
        let idx = self.index(pos);
        &mut self.nodes[idx].item
    }

    fn retire(&mut self, pos: usize, _len: usize) {
        let idx = self.index(pos);
        if self.tail == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_back(idx);
    }

    fn relocate(&mut self, dest: usize, src: usize) {
        let moving = self.index(src);
        self.unlink(moving);
        if dest < src {
            let at = self.index(dest);
            self.link_before(at, moving);
        } else {
            // Everything past `src` shifted back by one when it was unlinked
            let at = self.index(dest - 1);
            self.link_after(at, moving);
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        let (a, b) = (self.index(a), self.index(b));
        let item = self.nodes[a].item.take();
        self.nodes[a].item = std::mem::replace(&mut self.nodes[b].item, item);
    }
}

/// Iterator over the first `remaining` nodes of a [List].
pub(crate) struct Iter<'a> {
    list: &'a List,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let node = &self.list.nodes[self.cursor?];
            self.cursor = node.next;
            self.remaining -= 1;
            if let Some(item) = node.item.as_ref() {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(list: &List) -> Vec<usize> {
        let mut order = Vec::new();
        let mut cursor = list.head;
        let mut prev = None;
        while let Some(idx) = cursor {
            assert_eq!(list.nodes[idx].prev, prev, "broken back-link at {idx}");
            order.push(idx);
            prev = cursor;
            cursor = list.nodes[idx].next;
        }
        assert_eq!(list.tail, prev);
        order
    }

    #[test]
    fn test_list_links_stay_consistent() {
        let mut list = List::default();
        for _ in 0..5 {
            list.grow().unwrap();
        }
        assert_eq!(links(&list), vec![0, 1, 2, 3, 4]);

        list.retire(0, 5);
        assert_eq!(links(&list), vec![1, 2, 3, 4, 0]);

        list.relocate(3, 0);
        assert_eq!(links(&list), vec![2, 3, 4, 1, 0]);

        list.relocate(0, 4);
        assert_eq!(links(&list), vec![0, 2, 3, 4, 1]);

        list.retire(4, 5);
        assert_eq!(links(&list), vec![0, 2, 3, 4, 1]);
    }
}
