//! Decomposition of a rectangle around an obstacle.

use crate::Rect;

/// Splits a rectangle into disjoint fragments that avoid another rectangle.
pub trait Splitter {
    /// Returns fragments covering exactly the cells of `rect` that are not covered by `cut`.
    ///
    /// Fragments must be valid and pairwise disjoint. If the rectangles do not overlap, `rect`
    /// is returned unchanged.
    fn split(cut: &Rect, rect: &Rect) -> Vec<Rect>;
}

/// Splits into horizontal bands.
///
/// The parts of `rect` above and below `cut` span the full width of `rect`. The remaining
/// middle band yields a strip on either side of `cut`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bands;

impl Splitter for Bands {
    fn split(cut: &Rect, rect: &Rect) -> Vec<Rect> {
        let Some(overlap) = cut.intersection(rect) else {
            return vec![*rect];
        };

        // Edges of valid rectangles fit in `i32`
        let (bottom, right) = (overlap.bottom() as i32, overlap.right() as i32);
        let mut fragments = Vec::with_capacity(4);
        if rect.y < overlap.y {
            fragments.push(Rect::new(rect.x, rect.y, rect.width, overlap.y - rect.y));
        }
        if rect.bottom() > overlap.bottom() {
            fragments.push(Rect::new(
                rect.x,
                bottom,
                rect.width,
                (rect.bottom() - overlap.bottom()) as i32,
            ));
        }
        if rect.x < overlap.x {
            fragments.push(Rect::new(
                rect.x,
                overlap.y,
                overlap.x - rect.x,
                overlap.height,
            ));
        }
        if rect.right() > overlap.right() {
            fragments.push(Rect::new(
                right,
                overlap.y,
                (rect.right() - overlap.right()) as i32,
                overlap.height,
            ));
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(fragments: &[Rect]) -> u64 {
        fragments.iter().map(Rect::area).sum()
    }

    fn check(cut: Rect, rect: Rect) -> Vec<Rect> {
        let fragments = Bands::split(&cut, &rect);
        let expected = rect.area() - cut.intersection(&rect).map_or(0, |r| r.area());
        assert_eq!(area(&fragments), expected);
        for (i, fragment) in fragments.iter().enumerate() {
            assert!(fragment.is_valid());
            assert!(rect.contains(fragment));
            assert!(!fragment.overlaps(&cut));
            for other in &fragments[i + 1..] {
                assert!(!fragment.overlaps(other));
            }
        }
        fragments
    }

    #[test]
    fn test_bands_corner() {
        let fragments = check(Rect::new(0, 0, 10, 10), Rect::new(5, 5, 10, 10));
        assert_eq!(
            fragments,
            vec![Rect::new(5, 10, 10, 5), Rect::new(10, 5, 5, 5)]
        );
    }

    #[test]
    fn test_bands_hole() {
        // `cut` strictly inside `rect` leaves four fragments
        let fragments = check(Rect::new(3, 3, 2, 2), Rect::new(0, 0, 8, 8));
        assert_eq!(fragments.len(), 4);
    }

    #[test]
    fn test_bands_cross() {
        let fragments = check(Rect::new(4, 0, 2, 10), Rect::new(0, 4, 10, 2));
        assert_eq!(
            fragments,
            vec![Rect::new(0, 4, 4, 2), Rect::new(6, 4, 4, 2)]
        );
    }

    #[test]
    fn test_bands_disjoint() {
        let rect = Rect::new(20, 20, 5, 5);
        assert_eq!(Bands::split(&Rect::new(0, 0, 10, 10), &rect), vec![rect]);
    }

    #[test]
    fn test_bands_near_limits() {
        let fragments = check(
            Rect::new(i32::MAX - 10, i32::MAX - 10, 5, 5),
            Rect::new(i32::MAX - 20, i32::MAX - 20, 20, 20),
        );
        assert_eq!(fragments.len(), 4);
        assert!(fragments.iter().all(Rect::is_valid));
    }

    #[test]
    fn test_bands_covered() {
        assert!(check(Rect::new(0, 0, 10, 10), Rect::new(1, 1, 2, 2)).is_empty());
    }
}
