//! Implementation of [Queue].

use crate::{
    store::{Backing, Iter},
    Borrowed, Config, Destructor, Error, Item, Metrics, Owned, Ownership, StorageMode,
};
use prometheus_client::registry::Registry;
use std::{fmt, marker::PhantomData, num::NonZeroUsize};
use tracing::{debug, trace, warn};

/// Ordered container of fixed-size payloads.
///
/// See the [crate] documentation for the storage, capacity and ownership rules.
pub struct Queue<O: Ownership = Owned> {
    element_size: NonZeroUsize,
    destructor: Option<Destructor>,
    backing: Backing,

    // Invariant: `len <= backing.capacity()`, and every slot in `[0, len)` holds an item.
    len: usize,

    pub(crate) metrics: Metrics,
    _ownership: PhantomData<O>,
}

/// Run `destructor` on `item` if the queue owns its payloads.
fn destruct<O: Ownership>(destructor: Option<&Destructor>, item: &Item) {
    if !O::OWNING {
        return;
    }
    if let Some(destructor) = destructor {
        destructor(item.as_bytes());
    }
}

impl<O: Ownership> Queue<O> {
    /// Initialize an empty queue.
    ///
    /// No slot is allocated until the first element is added.
    pub fn init(cfg: Config) -> Self {
        Self {
            element_size: cfg.element_size,
            destructor: cfg.destructor,
            backing: Backing::new(cfg.storage),
            len: 0,
            metrics: Metrics::default(),
            _ownership: PhantomData,
        }
    }

    /// Register the queue's metrics with the given registry.
    pub fn register(&self, registry: &mut Registry) {
        self.metrics.register(registry);
    }

    /// Returns the size (in bytes) of every payload copied into the queue.
    pub fn element_size(&self) -> usize {
        self.element_size.get()
    }

    /// Returns the current slot layout.
    pub fn storage_mode(&self) -> StorageMode {
        self.backing.mode()
    }

    /// Change the slot layout.
    ///
    /// Only allowed while no slot has ever been allocated (since initialization or the last
    /// [Queue::destroy]).
    pub fn set_storage_mode(&mut self, mode: StorageMode) -> Result<(), Error> {
        if self.len > 0 || self.capacity() > 0 {
            warn!(?mode, capacity = self.capacity(), "storage mode locked");
            return Err(Error::StorageModeLocked);
        }
        self.backing = Backing::new(mode);
        debug!(?mode, "storage mode set");
        Ok(())
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.backing.store().capacity()
    }

    /// Returns the element at `pos`, if it exists.
    pub fn get(&self, pos: usize) -> Option<&Item> {
        if pos >= self.len {
            return None;
        }
        self.backing.store().slot(pos)
    }

    /// Returns the payload at `pos`, if it exists.
    pub fn get_bytes(&self, pos: usize) -> Option<&[u8]> {
        self.get(pos).map(Item::as_bytes)
    }

    /// Returns the position of `item` (compared by identity, not content).
    pub fn find(&self, item: &Item) -> Option<usize> {
        self.iter().position(|stored| stored.ptr_eq(item))
    }

    /// Iterate over all elements in position order.
    pub fn iter(&self) -> Iter<'_> {
        self.backing.iter(self.len)
    }

    fn check(&self, pos: usize) -> Result<(), Error> {
        if pos >= self.len {
            return Err(Error::OutOfRange { pos, len: self.len });
        }
        Ok(())
    }

    fn check_size(&self, data: &[u8]) -> Result<(), Error> {
        if data.len() != self.element_size.get() {
            return Err(Error::InvalidElementSize {
                expected: self.element_size.get(),
                actual: data.len(),
            });
        }
        Ok(())
    }

    /// Returns the position of the next element, allocating a slot if all are occupied.
    fn claim(&mut self) -> Result<usize, Error> {
        let pos = self.len;
        let store = self.backing.store_mut();
        if pos == store.capacity() {
            store.grow()?;
            self.metrics.grown.inc();
            self.metrics.capacity.set(store.capacity() as i64);
            trace!(capacity = store.capacity(), "grew queue");
        }
        Ok(pos)
    }

    fn commit(&mut self, pos: usize) -> usize {
        self.len = pos + 1;
        self.metrics.items.set(self.len as i64);
        pos
    }

    /// Copy `data` into the slot at `pos`, reusing the buffer it retains when possible.
    fn write(&mut self, pos: usize, data: &[u8]) {
        let slot = self.backing.store_mut().slot_mut(pos);
        if O::OWNING {
            if let Some(buf) = slot.as_mut().and_then(Item::get_mut) {
                buf.copy_from_slice(data);
                self.metrics.reused.inc();
                trace!(pos, "reused buffer");
                return;
            }
        }
        *slot = Some(Item::new(data));
    }

    /// Append a copy of `data`, returning its position.
    ///
    /// `data` must be exactly `element_size` bytes long.
    pub fn add(&mut self, data: &[u8]) -> Result<usize, Error> {
        self.check_size(data)?;
        let pos = self.claim()?;
        self.write(pos, data);
        Ok(self.commit(pos))
    }

    /// Append a reference to an existing payload, returning its position.
    ///
    /// The payload is not copied.
    pub fn add_reference(&mut self, item: Item) -> Result<usize, Error> {
        let pos = self.claim()?;
        *self.backing.store_mut().slot_mut(pos) = Some(item);
        Ok(self.commit(pos))
    }

    /// Overwrite the payload at `pos` with a copy of `data`.
    ///
    /// Owned queues run the destructor on the previous payload first.
    pub fn replace(&mut self, pos: usize, data: &[u8]) -> Result<(), Error> {
        self.check(pos)?;
        self.check_size(data)?;
        if let Some(old) = self.backing.store().slot(pos) {
            destruct::<O>(self.destructor.as_ref(), old);
        }
        self.write(pos, data);
        Ok(())
    }

    /// Overwrite the element at `pos` with a reference to an existing payload.
    ///
    /// Owned queues run the destructor on the previous payload first.
    pub fn replace_reference(&mut self, pos: usize, item: Item) -> Result<(), Error> {
        self.check(pos)?;
        let slot = self.backing.store_mut().slot_mut(pos);
        if let Some(old) = slot.as_ref() {
            destruct::<O>(self.destructor.as_ref(), old);
        }
        *slot = Some(item);
        Ok(())
    }

    /// Move the vacated slot at `pos` behind the remaining elements.
    fn retire(&mut self, pos: usize) {
        self.backing.store_mut().retire(pos, self.len);
        self.len -= 1;
        self.metrics.items.set(self.len as i64);
    }

    /// Remove the element at `pos`, shifting later elements one position earlier.
    ///
    /// Owned queues run the destructor on the payload and keep its (zeroed) buffer for the next
    /// insertion. Borrowed queues only clear the reference.
    pub fn delete(&mut self, pos: usize) -> Result<(), Error> {
        self.check(pos)?;
        let slot = self.backing.store_mut().slot_mut(pos);
        match slot.as_mut() {
            Some(item) if O::OWNING => {
                destruct::<O>(self.destructor.as_ref(), item);
                let retained = match item.get_mut() {
                    Some(buf) => {
                        buf.fill(0);
                        true
                    }
                    None => false,
                };

                // A payload still referenced elsewhere is left to its other holders
                if !retained {
                    *slot = None;
                }
            }
            _ => *slot = None,
        }
        self.retire(pos);
        Ok(())
    }

    /// Remove the element at `pos` without running the destructor, returning it.
    ///
    /// Later elements shift one position earlier. The returned [Item] can be added to another
    /// queue with [Queue::add_reference] or [Queue::insert_reference].
    pub fn delete_reference(&mut self, pos: usize) -> Result<Item, Error> {
        self.check(pos)?;
        let item = self
            .backing
            .store_mut()
            .slot_mut(pos)
            .take()
            .ok_or(Error::OutOfRange { pos, len: self.len })?;
        self.retire(pos);
        Ok(item)
    }

    /// Move the element at `src` to `dest`, preserving the order of all other elements.
    pub fn relocate(&mut self, dest: usize, src: usize) -> Result<(), Error> {
        self.check(dest)?;
        self.check(src)?;
        if dest == src {
            return Ok(());
        }
        self.backing.store_mut().relocate(dest, src);
        Ok(())
    }

    /// Insert a copy of `data` at `pos`, shifting the element at `pos` (and all after it) one
    /// position later.
    ///
    /// `pos` may equal `len()` (which appends).
    pub fn insert(&mut self, pos: usize, data: &[u8]) -> Result<usize, Error> {
        if pos > self.len {
            return Err(Error::OutOfRange { pos, len: self.len });
        }
        let src = self.add(data)?;
        self.relocate(pos, src)?;
        Ok(pos)
    }

    /// Insert a reference to an existing payload at `pos`, shifting the element at `pos` (and
    /// all after it) one position later.
    pub fn insert_reference(&mut self, pos: usize, item: Item) -> Result<usize, Error> {
        if pos > self.len {
            return Err(Error::OutOfRange { pos, len: self.len });
        }
        let src = self.add_reference(item)?;
        self.relocate(pos, src)?;
        Ok(pos)
    }

    /// Exchange the elements at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), Error> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(Error::SamePosition(a));
        }
        self.backing.store_mut().swap(a, b);
        Ok(())
    }

    /// Append references to every element of `src`, returning the number appended.
    ///
    /// Payloads are shared, not copied, regardless of either queue's ownership policy. An
    /// [Owned] destination treats the appended payloads as its own: its destructor runs on them
    /// when they are overwritten, deleted, or torn down, in addition to any destructor `src`
    /// runs on the same payloads. Concatenate into a [Borrowed] queue (or use
    /// [Queue::copy_from]) when `src` remains the owner.
    pub fn concat<P: Ownership>(&mut self, src: &Queue<P>) -> Result<usize, Error> {
        for item in src.iter() {
            self.add_reference(item.clone())?;
        }
        Ok(src.len())
    }

    /// Append copies of every element of `src`, returning the number appended.
    pub fn copy_from<P: Ownership>(&mut self, src: &Queue<P>) -> Result<usize, Error> {
        if src.element_size != self.element_size {
            return Err(Error::InvalidElementSize {
                expected: self.element_size.get(),
                actual: src.element_size.get(),
            });
        }
        for item in src.iter() {
            self.add(item)?;
        }
        Ok(src.len())
    }

    /// Run the destructor on every element (owned queues only) and release all slots.
    ///
    /// The queue is left empty with no allocated slots, so its storage mode may be changed again.
    pub fn destroy(&mut self) {
        self.teardown();
        let mode = self.backing.mode();
        self.backing = Backing::new(mode);
        self.metrics.items.set(0);
        self.metrics.capacity.set(0);
        debug!(?mode, "destroyed queue");
    }

    fn teardown(&mut self) {
        if O::OWNING && self.destructor.is_some() {
            for item in self.backing.iter(self.len) {
                destruct::<O>(self.destructor.as_ref(), item);
            }
        }
        self.len = 0;
    }
}

impl Queue<Owned> {
    /// Stop owning payloads.
    ///
    /// The destructor is dropped: it never runs on existing or future elements.
    pub fn into_borrowed(mut self) -> Queue<Borrowed> {
        let mode = self.backing.mode();
        let backing = std::mem::replace(&mut self.backing, Backing::new(mode));
        let len = std::mem::take(&mut self.len);
        debug!(len, "switched to borrowed payloads");
        Queue {
            element_size: self.element_size,
            destructor: None,
            backing,
            len,
            metrics: self.metrics.clone(),
            _ownership: PhantomData,
        }
    }
}

impl<O: Ownership> Drop for Queue<O> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<'a, O: Ownership> IntoIterator for &'a Queue<O> {
    type Item = &'a Item;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<O: Ownership> fmt::Debug for Queue<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("storage", &self.storage_mode())
            .field("element_size", &self.element_size)
            .field("owning", &O::OWNING)
            .finish()
    }
}
