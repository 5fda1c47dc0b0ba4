//! Axis-aligned bounding boxes
//!
//! Every entity on the map occupies a box whose origin is its top-left
//! corner. Boxes are half-open: two boxes that only share an edge do not
//! overlap.

/// A box defined by its top-left corner and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test. Symmetric.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Grow the right and bottom edges by `margin`, keeping the origin
    pub fn expand_trailing(&self, margin: f32) -> Self {
        Self::new(self.x, self.y, self.w + margin, self.h + margin)
    }

    /// True if `inner` lies entirely inside this box (edges may touch)
    pub fn contains_bounds(&self, inner: &Bounds) -> bool {
        inner.left() >= self.left()
            && inner.top() >= self.top()
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Bounds::new(10.0, 20.0, 32.0, 16.0);
        assert_eq!(b.right(), 42.0);
        assert_eq!(b.bottom(), 36.0);
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Bounds::new(0.0, 0.0, 32.0, 32.0);
        let b = Bounds::new(16.0, 16.0, 32.0, 32.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Bounds::new(0.0, 0.0, 32.0, 32.0);
        let right = Bounds::new(32.0, 0.0, 32.0, 32.0);
        let below = Bounds::new(0.0, 32.0, 32.0, 32.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!right.intersects(&a));
    }

    #[test]
    fn test_expand_trailing_keeps_origin() {
        let b = Bounds::new(5.0, 6.0, 10.0, 10.0).expand_trailing(4.0);
        assert_eq!(b, Bounds::new(5.0, 6.0, 14.0, 14.0));
    }

    #[test]
    fn test_contains_bounds() {
        let outer = Bounds::new(10.0, 10.0, 100.0, 100.0);
        assert!(outer.contains_bounds(&Bounds::new(10.0, 10.0, 100.0, 100.0)));
        assert!(outer.contains_bounds(&Bounds::new(50.0, 50.0, 10.0, 10.0)));
        assert!(!outer.contains_bounds(&Bounds::new(5.0, 50.0, 10.0, 10.0)));
        assert!(!outer.contains_bounds(&Bounds::new(105.0, 50.0, 10.0, 10.0)));
    }
}
