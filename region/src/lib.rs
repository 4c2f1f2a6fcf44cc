//! Collection of non-overlapping rectangles.
//!
//! A [Region] accumulates rectangles (for example, areas of a screen that must be redrawn) while
//! keeping its stored set free of redundancy:
//!
//! - no stored rectangle is empty,
//! - no stored rectangle is contained in (or equal to) another,
//! - no two stored rectangles overlap.
//!
//! Adding a rectangle that partially overlaps a stored one decomposes it (with a [Splitter]) into
//! fragments outside the stored rectangle, and each fragment is added in turn. The area covered
//! by the region is always the union of every rectangle accepted by [Region::add].
//!
//! Rectangles are kept in a [tessel_queue::Queue] as fixed-size payloads (see [Rect::SIZE]).
//!
//! # Example
//!
//! ```rust
//! use tessel_queue::StorageMode;
//! use tessel_region::{Rect, Region};
//!
//! let mut region: Region = Region::init(StorageMode::Array);
//! region.add(Rect::new(0, 0, 10, 10)).unwrap();
//! region.add(Rect::new(5, 5, 10, 10)).unwrap();
//! assert_eq!(region.area(), 175);
//!
//! // Already covered
//! assert_eq!(region.add(Rect::new(2, 2, 3, 3)).unwrap(), None);
//! ```

mod rect;
mod region;
mod split;

pub use rect::Rect;
pub use region::Region;
pub use split::{Bands, Splitter};

use thiserror::Error;

/// Errors that can occur when interacting with a [Region].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("queue error: {0}")]
    Queue(#[from] tessel_queue::Error),
    #[error("unexpected end of buffer")]
    EndOfBuffer,
}
