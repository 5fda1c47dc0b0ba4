//! Collision System
//!
//! Box-vs-box tests between entities. Two flavours:
//! - `intersects`: the boxes actually overlap (used to kill slimes)
//! - `in_proximity`: the boxes overlap once both are grown by a margin on
//!   their right and bottom edges (used for mining and spawn exclusion)

use super::geometry::Bounds;

/// Anything that occupies a box on the map
pub trait Collider {
    fn bounds(&self) -> Bounds;
}

impl Collider for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

/// True if the boxes of `a` and `b` overlap
pub fn intersects(a: &impl Collider, b: &impl Collider) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// True if the boxes overlap after growing both by `margin` on the
/// trailing edges.
///
/// Because both boxes are grown by the same amount, swapping `a` and `b`
/// gives the same answer.
pub fn in_proximity(a: &impl Collider, b: &impl Collider, margin: f32) -> bool {
    a.bounds()
        .expand_trailing(margin)
        .intersects(&b.bounds().expand_trailing(margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(x: f32, y: f32) -> Bounds {
        Bounds::new(x, y, 32.0, 32.0)
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let pairs = [
            (boxed(0.0, 0.0), boxed(31.0, 31.0)),
            (boxed(0.0, 0.0), boxed(32.0, 0.0)),
            (boxed(100.0, 40.0), boxed(90.0, 60.0)),
            (boxed(0.0, 0.0), boxed(-31.5, 0.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }
    }

    #[test]
    fn test_proximity_reaches_past_the_gap() {
        // 5px gap to the right: close enough for a 10px margin, not for 2px
        let a = boxed(0.0, 0.0);
        let b = boxed(37.0, 0.0);
        assert!(!intersects(&a, &b));
        assert!(in_proximity(&a, &b, 10.0));
        assert!(!in_proximity(&a, &b, 2.0));
    }

    #[test]
    fn test_proximity_is_symmetric() {
        let a = boxed(0.0, 0.0);
        for (bx, by) in [(37.0, 0.0), (0.0, 41.9), (-40.0, -40.0), (-41.0, 0.0), (45.0, 45.0)] {
            let b = boxed(bx, by);
            for margin in [0.0, 2.0, 10.0] {
                assert_eq!(in_proximity(&a, &b, margin), in_proximity(&b, &a, margin));
            }
        }
    }

    #[test]
    fn test_zero_margin_matches_intersects() {
        let a = boxed(0.0, 0.0);
        for x in [-33.0, -32.0, -10.0, 0.0, 31.9, 32.0] {
            let b = boxed(x, 0.0);
            assert_eq!(in_proximity(&a, &b, 0.0), intersects(&a, &b));
        }
    }
}
