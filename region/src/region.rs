//! Implementation of [Region].

use crate::{Bands, Error, Rect, Splitter};
use std::{marker::PhantomData, num::NonZeroUsize};
use tessel_queue::{Config, Owned, Queue, StorageMode};
use tracing::{debug, trace};

const ELEMENT_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(Rect::SIZE - 1);

/// Collection of non-overlapping rectangles.
///
/// See the [crate] documentation for the invariants maintained by [Region::add].
#[derive(Debug)]
pub struct Region<S: Splitter = Bands> {
    queue: Queue<Owned>,
    _splitter: PhantomData<S>,
}

impl<S: Splitter> Region<S> {
    /// Initialize an empty region stored with the given layout.
    pub fn init(storage: StorageMode) -> Self {
        let mut cfg = Config::new(ELEMENT_SIZE);
        cfg.storage = storage;
        Self {
            queue: Queue::init(cfg),
            _splitter: PhantomData,
        }
    }

    /// Returns the number of stored rectangles.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if no rectangle is stored.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the rectangle stored at `pos`, if it exists.
    pub fn get(&self, pos: usize) -> Option<Rect> {
        let mut bytes = self.queue.get_bytes(pos)?;
        Rect::read(&mut bytes).ok()
    }

    /// Iterate over the stored rectangles in position order.
    pub fn iter(&self) -> impl Iterator<Item = Rect> + '_ {
        self.queue
            .iter()
            .filter_map(|item| Rect::read(&mut item.as_bytes()).ok())
    }

    /// Returns the number of cells covered by the region.
    pub fn area(&self) -> u64 {
        self.iter().map(|rect| rect.area()).sum()
    }

    /// Add `rect` to the region.
    ///
    /// Stored rectangles contained in `rect` are removed. If `rect` is already covered by a
    /// stored rectangle, nothing is added. If `rect` partially overlaps a stored rectangle, it is
    /// split into fragments outside of it and each fragment is added in turn.
    ///
    /// Returns the position of `rect` if it was stored as a whole, or `None` if it was invalid,
    /// already covered, or split.
    pub fn add(&mut self, rect: Rect) -> Result<Option<usize>, Error> {
        if !rect.is_valid() {
            trace!(?rect, "ignored invalid rectangle");
            return Ok(None);
        }

        let mut pos = 0;
        while let Some(existing) = self.get(pos) {
            // Includes the equal case, which must not reach the pruning below
            if existing.is_valid() && existing.contains(&rect) {
                trace!(pos, ?rect, "rectangle already covered");
                return Ok(None);
            }

            // Deleting shifts the next rectangle into `pos`
            if !existing.is_valid() || rect.contains(&existing) {
                self.queue.delete(pos)?;
                trace!(pos, ?existing, "pruned covered rectangle");
                continue;
            }
            if existing.overlaps(&rect) {
                let fragments = S::split(&existing, &rect);
                trace!(pos, ?rect, fragments = fragments.len(), "split rectangle");
                for fragment in fragments {
                    self.add(fragment)?;
                }
                return Ok(None);
            }
            pos += 1;
        }

        let pos = self.queue.add(&rect.encode())?;
        Ok(Some(pos))
    }

    /// Add every rectangle of `src`, returning how many were stored as a whole.
    pub fn copy_from<T: Splitter>(&mut self, src: &Region<T>) -> Result<usize, Error> {
        let mut stored = 0;
        for rect in src.iter() {
            if self.add(rect)?.is_some() {
                stored += 1;
            }
        }
        Ok(stored)
    }

    /// Remove every rectangle.
    pub fn clear(&mut self) {
        self.queue.destroy();
        debug!("cleared region");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_macros::test_traced;
    use test_case::test_case;

    fn assert_disjoint<S: Splitter>(region: &Region<S>) {
        let rects: Vec<Rect> = region.iter().collect();
        for (i, rect) in rects.iter().enumerate() {
            assert!(rect.is_valid());
            for other in &rects[i + 1..] {
                assert!(!rect.overlaps(other), "{rect:?} overlaps {other:?}");
            }
        }
    }

    #[test_case(StorageMode::Array; "array")]
    #[test_case(StorageMode::LinkedList; "linked list")]
    fn test_region_partial_overlap(storage: StorageMode) {
        let mut region = Region::<Bands>::init(storage);
        assert_eq!(region.add(Rect::new(0, 0, 10, 10)).unwrap(), Some(0));
        assert_eq!(region.add(Rect::new(5, 5, 10, 10)).unwrap(), None);

        assert_disjoint(&region);
        assert_eq!(region.area(), 175);
        assert_eq!(region.get(0), Some(Rect::new(0, 0, 10, 10)));
        assert_eq!(region.len(), 3);
    }

    #[test_traced]
    fn test_region_contained_is_noop() {
        let mut region = Region::<Bands>::init(StorageMode::Array);
        region.add(Rect::new(0, 0, 10, 10)).unwrap();
        assert_eq!(region.add(Rect::new(2, 2, 3, 3)).unwrap(), None);
        assert_eq!(region.add(Rect::new(0, 0, 10, 10)).unwrap(), None);
        assert_eq!(region.len(), 1);
    }

    #[test_traced]
    fn test_region_prunes_contained() {
        let mut region = Region::<Bands>::init(StorageMode::LinkedList);
        region.add(Rect::new(1, 1, 2, 2)).unwrap();
        region.add(Rect::new(5, 5, 2, 2)).unwrap();
        region.add(Rect::new(20, 20, 2, 2)).unwrap();

        // Both adjacent covered rectangles are removed
        assert_eq!(region.add(Rect::new(0, 0, 10, 10)).unwrap(), Some(1));
        assert_eq!(
            region.iter().collect::<Vec<_>>(),
            vec![Rect::new(20, 20, 2, 2), Rect::new(0, 0, 10, 10)]
        );
    }

    #[test_traced]
    fn test_region_prunes_invalid_stored() {
        let mut region = Region::<Bands>::init(StorageMode::Array);
        region.add(Rect::new(0, 0, 2, 2)).unwrap();
        region.queue.add(&Rect::new(5, 5, 0, 3).encode()).unwrap();
        region.queue.add(&Rect::new(5, 5, 3, -1).encode()).unwrap();
        region.add(Rect::new(20, 0, 2, 2)).unwrap();
        assert_eq!(region.len(), 4);

        // Both invalid entries are removed on the next add that reaches them
        assert_eq!(region.add(Rect::new(40, 0, 2, 2)).unwrap(), Some(2));
        assert_eq!(
            region.iter().collect::<Vec<_>>(),
            vec![
                Rect::new(0, 0, 2, 2),
                Rect::new(20, 0, 2, 2),
                Rect::new(40, 0, 2, 2)
            ]
        );
    }

    #[test_traced]
    fn test_region_equal_is_noop() {
        let mut region = Region::<Bands>::init(StorageMode::LinkedList);
        region.add(Rect::new(0, 0, 10, 10)).unwrap();
        region.add(Rect::new(20, 0, 5, 5)).unwrap();
        assert_eq!(region.add(Rect::new(0, 0, 10, 10)).unwrap(), None);
        assert_eq!(region.get(0), Some(Rect::new(0, 0, 10, 10)));
        assert_eq!(region.get(1), Some(Rect::new(20, 0, 5, 5)));
        assert_eq!(region.len(), 2);
    }

    #[test]
    fn test_region_near_limits() {
        let mut region = Region::<Bands>::init(StorageMode::Array);
        region.add(Rect::new(0, 0, 10, 10)).unwrap();
        assert_eq!(region.add(Rect::new(i32::MAX - 5, 0, 10, 10)).unwrap(), None);
        assert_eq!(region.len(), 1);

        let edge = Rect::new(i32::MAX - 10, 0, 10, 10);
        assert_eq!(region.add(edge).unwrap(), Some(1));
        assert_eq!(region.add(Rect::new(i32::MAX - 15, 5, 10, 10)).unwrap(), None);
        assert_eq!(region.area(), 100 + 100 + 5 * 5 + 10 * 5);
    }

    #[test]
    fn test_region_rejects_invalid() {
        let mut region = Region::<Bands>::init(StorageMode::Array);
        assert_eq!(region.add(Rect::new(0, 0, 0, 10)).unwrap(), None);
        assert_eq!(region.add(Rect::new(0, 0, 10, -1)).unwrap(), None);
        assert!(region.is_empty());
    }

    #[test]
    fn test_region_copy_from() {
        let mut src = Region::<Bands>::init(StorageMode::Array);
        src.add(Rect::new(0, 0, 4, 4)).unwrap();
        src.add(Rect::new(10, 0, 4, 4)).unwrap();

        let mut dest = Region::<Bands>::init(StorageMode::LinkedList);
        dest.add(Rect::new(2, 0, 4, 4)).unwrap();
        assert_eq!(dest.copy_from(&src).unwrap(), 1);
        assert_disjoint(&dest);
        assert_eq!(dest.area(), 6 * 4 + 16);
        assert_eq!(src.len(), 2);
    }

    #[test]
    fn test_region_clear() {
        let mut region = Region::<Bands>::init(StorageMode::Array);
        region.add(Rect::new(0, 0, 4, 4)).unwrap();
        region.clear();
        assert!(region.is_empty());
        assert_eq!(region.get(0), None);
        assert_eq!(region.add(Rect::new(0, 0, 4, 4)).unwrap(), Some(0));
    }
}
