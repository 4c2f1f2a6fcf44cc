//! Axis-aligned rectangles.

use crate::Error;
use bytes::{Buf, BufMut};

/// Axis-aligned rectangle with its origin at the top-left corner.
///
/// The right and bottom edges are exclusive: a rectangle covers the cells
/// `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Size of the encoded rectangle.
    pub const SIZE: usize = 4 * std::mem::size_of::<i32>();

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the rectangle covers at least one cell and both of its far edges are
    /// representable as `i32`.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some()
            && self.y.checked_add(self.height).is_some()
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Number of cells covered (zero for invalid rectangles).
    pub fn area(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if every cell of `other` is covered by `self`.
    ///
    /// Equal rectangles contain each other.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns `true` if the two rectangles share at least one cell.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Returns the cells covered by both rectangles, if any.
    ///
    /// Invalid rectangles never intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = self.right().min(other.right()) - x as i64;
        let height = self.bottom().min(other.bottom()) - y as i64;
        if width <= 0 || height <= 0 {
            return None;
        }

        // Bounded by the extent of either rectangle
        Some(Rect::new(x, y, width as i32, height as i32))
    }

    /// Encode the rectangle (big-endian fields in `x, y, width, height` order).
    pub fn write(&self, buf: &mut impl BufMut) {
        buf.put_i32(self.x);
        buf.put_i32(self.y);
        buf.put_i32(self.width);
        buf.put_i32(self.height);
    }

    /// Decode a rectangle written by [Rect::write].
    pub fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        if buf.remaining() < Self::SIZE {
            return Err(Error::EndOfBuffer);
        }
        Ok(Self {
            x: buf.get_i32(),
            y: buf.get_i32(),
            width: buf.get_i32(),
            height: buf.get_i32(),
        })
    }

    /// Returns the encoded rectangle.
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut encoded = [0u8; Self::SIZE];
        self.write(&mut &mut encoded[..]);
        encoded
    }
}
