//! Shared, lock-guarded access to a [Queue].
//!
//! [Queue] operations are not synchronized on their own. A [Handle] places a queue behind a
//! reader/writer lock and hands out scoped guards: callers wrap a batch of operations in one
//! guard to get a consistent view, and the lock is released when the guard is dropped (on every
//! exit path).
//!
//! Handles are reference-counted. [Handle::alias] returns a second handle to the same queue and
//! lock, so mutations through either are visible through both, and the queue is only torn down
//! once the last handle is gone.

use crate::{Config, Error, Item, Owned, Ownership, Queue};
use std::{
    ops::Deref,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError},
};
use tracing::{debug, warn};

/// Access requested from [Handle::using].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Shared with other readers.
    Read,
    /// Exclusive against all readers and writers.
    Write,
}

/// Guard returned by [Handle::using].
pub enum Access<'a, O: Ownership> {
    Read(RwLockReadGuard<'a, Queue<O>>),
    Write(RwLockWriteGuard<'a, Queue<O>>),
}

impl<O: Ownership> Access<'_, O> {
    /// Returns the mode this guard was acquired with.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Read(_) => Mode::Read,
            Self::Write(_) => Mode::Write,
        }
    }

    /// Mutable access to the queue, if the guard is exclusive.
    pub fn get_mut(&mut self) -> Option<&mut Queue<O>> {
        match self {
            Self::Read(_) => None,
            Self::Write(guard) => Some(&mut **guard),
        }
    }
}

impl<O: Ownership> Deref for Access<'_, O> {
    type Target = Queue<O>;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Read(guard) => &**guard,
            Self::Write(guard) => &**guard,
        }
    }
}

/// Reference-counted handle to a lock-guarded [Queue].
pub struct Handle<O: Ownership = Owned> {
    inner: Arc<RwLock<Queue<O>>>,
}

impl<O: Ownership> Handle<O> {
    /// Place `queue` behind a new lock.
    pub fn new(queue: Queue<O>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(queue)),
        }
    }

    /// Initialize a new queue behind a new lock.
    pub fn init(cfg: Config) -> Self {
        Self::new(Queue::init(cfg))
    }

    /// Acquire a shared guard, blocking while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Queue<O>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire an exclusive guard, blocking while any reader or writer holds the lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, Queue<O>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire the lock exclusively (for plain mutual exclusion).
    pub fn lock(&self) -> RwLockWriteGuard<'_, Queue<O>> {
        self.write()
    }

    /// Acquire the lock in the given [Mode].
    pub fn using(&self, mode: Mode) -> Access<'_, O> {
        match mode {
            Mode::Read => Access::Read(self.read()),
            Mode::Write => Access::Write(self.write()),
        }
    }

    /// Try to acquire a shared guard without waiting.
    pub fn try_read(&self) -> Option<RwLockReadGuard<'_, Queue<O>>> {
        match self.inner.try_read() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(err)) => Some(err.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Try to acquire an exclusive guard without waiting.
    pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, Queue<O>>> {
        match self.inner.try_write() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(err)) => Some(err.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Returns another handle to the same queue and lock.
    pub fn alias(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }

    /// Returns the number of handles referencing this queue (including this one).
    pub fn handles(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns `true` if both handles reference the same queue.
    pub fn same_queue<P: Ownership>(&self, other: &Handle<P>) -> bool {
        Arc::as_ptr(&self.inner).cast::<()>() == Arc::as_ptr(&other.inner).cast::<()>()
    }

    /// Rebind this handle to the queue referenced by `src`.
    ///
    /// Fails (leaving this handle untouched) if the two queues use different storage modes.
    /// The previously referenced queue is dropped if this was its last handle.
    pub fn quote(&mut self, src: &Self) -> Result<(), Error> {
        if self.same_queue(src) {
            return Ok(());
        }
        let dest = self.read().storage_mode();
        let source = src.read().storage_mode();
        if dest != source {
            return Err(Error::StorageModeMismatch { dest, src: source });
        }
        self.inner = src.inner.clone();
        Ok(())
    }

    /// Append references to every element of `src`, returning the number appended.
    ///
    /// The elements of `src` are collected under its read guard, which is released before this
    /// handle's write guard is acquired, so at most one lock is held at a time. `src` may alias
    /// this handle, in which case the queue is appended to itself.
    pub fn concat<P: Ownership>(&self, src: &Handle<P>) -> Result<usize, Error> {
        let items: Vec<Item> = src.read().iter().cloned().collect();
        let mut queue = self.write();
        for item in &items {
            queue.add_reference(item.clone())?;
        }
        Ok(items.len())
    }

    /// Tear down the queue if this is its last handle.
    ///
    /// If other handles still reference the queue, nothing is destroyed and
    /// [Error::Aliased] reports how many remain.
    pub fn destroy(self) -> Result<(), Error> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => {
                let mut queue = lock.into_inner().unwrap_or_else(PoisonError::into_inner);
                queue.destroy();
                debug!("destroyed last handle");
                Ok(())
            }
            Err(inner) => {
                let remaining = Arc::strong_count(&inner) - 1;
                warn!(remaining, "queue still aliased");
                Err(Error::Aliased(remaining))
            }
        }
    }
}

impl<O: Ownership> From<Queue<O>> for Handle<O> {
    fn from(queue: Queue<O>) -> Self {
        Self::new(queue)
    }
}
