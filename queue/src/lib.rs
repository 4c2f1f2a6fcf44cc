//! Ordered container of fixed-size payloads backed by an array or a linked list.
//!
//! A [Queue] stores elements at positions `[0, len)`. Every element is an [Item]: a shareable
//! handle to an opaque byte payload. The same API is served by two structurally different
//! backings (selected with [StorageMode]):
//!
//! - [StorageMode::Array]: a resizable index of slots. Removal and relocation shift the slots
//!   between the affected positions.
//! - [StorageMode::LinkedList]: an arena of doubly-linked nodes. Removal and relocation splice
//!   a single node.
//!
//! # Capacity
//!
//! Slots are never released individually. A queue grows by exactly one slot when an element is
//! added while every slot is occupied, and `capacity()` never decreases until the queue is
//! destroyed. A deleted slot is moved past the last element and is the next one claimed by an
//! insertion.
//!
//! # Ownership
//!
//! The [Ownership] policy is fixed by the queue's type:
//!
//! - [Owned] queues own their payloads. The configured [Destructor] runs on a payload right
//!   before it is overwritten, deleted, or torn down, and a deleted payload's buffer is kept for
//!   reuse by the next insertion.
//! - [Borrowed] queues only hold references. The destructor never runs and deleting an element
//!   only clears the reference.
//!
//! [Queue::delete_reference] never runs the destructor (on either policy) and hands the removed
//! [Item] back to the caller, which is how elements are transferred between queues.
//!
//! # Locking
//!
//! [Queue] itself is not synchronized. [Handle] wraps a queue in a reader/writer lock, hands out
//! scoped guards for batches of operations, and lets several handles alias one queue.
//!
//! # Example
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use tessel_queue::{Config, Owned, Queue, StorageMode};
//!
//! let mut cfg = Config::new(NonZeroUsize::new(1).unwrap());
//! cfg.storage = StorageMode::LinkedList;
//! let mut queue = Queue::<Owned>::init(cfg);
//! for ch in b"0123456789" {
//!     queue.add(&[*ch]).unwrap();
//! }
//! queue.delete(5).unwrap();
//! let content: Vec<u8> = queue.iter().map(|item| item[0]).collect();
//! assert_eq!(content, b"012346789");
//! ```

mod handle;
mod item;
mod metrics;
mod ownership;
mod queue;
mod store;

pub use handle::{Access, Handle, Mode};
pub use item::Item;
pub use metrics::Metrics;
pub use ownership::{Borrowed, Owned, Ownership};
pub use queue::Queue;
pub use store::Iter;

use std::{collections::TryReserveError, num::NonZeroUsize, sync::Arc};
use thiserror::Error;

/// Errors that can occur when interacting with a [Queue].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("position {pos} out of range (len={len})")]
    OutOfRange { pos: usize, len: usize },
    #[error("positions must differ: {0}")]
    SamePosition(usize),
    #[error("storage mode cannot change once slots are allocated")]
    StorageModeLocked,
    #[error("storage mode mismatch: {dest:?} != {src:?}")]
    StorageModeMismatch { dest: StorageMode, src: StorageMode },
    #[error("invalid element size: expected {expected}, got {actual}")]
    InvalidElementSize { expected: usize, actual: usize },
    #[error("allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),
    #[error("backing shared by {0} other handles")]
    Aliased(usize),
}

/// How a [Queue] lays out its slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StorageMode {
    /// Contiguous index of slots.
    #[default]
    Array,
    /// Doubly-linked list of nodes.
    LinkedList,
}

/// Callback invoked on an owned payload before its storage is reused or released.
pub type Destructor = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Configuration for [Queue].
#[derive(Clone)]
pub struct Config {
    /// Size (in bytes) of every payload copied into the queue.
    pub element_size: NonZeroUsize,

    /// Layout of the backing slots.
    ///
    /// This can still be changed with [Queue::set_storage_mode] until the first slot is
    /// allocated.
    pub storage: StorageMode,

    /// Callback run on owned payloads before they are overwritten, deleted, or torn down.
    ///
    /// Never invoked by [Borrowed] queues.
    pub destructor: Option<Destructor>,
}

impl Config {
    /// Returns an array-backed configuration without a destructor.
    pub fn new(element_size: NonZeroUsize) -> Self {
        Self {
            element_size,
            storage: StorageMode::default(),
            destructor: None,
        }
    }

    /// Sets the [Destructor].
    pub fn with_destructor(mut self, destructor: impl Fn(&[u8]) + Send + Sync + 'static) -> Self {
        self.destructor = Some(Arc::new(destructor));
        self
    }
}
