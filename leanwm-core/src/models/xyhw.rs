//! Window and screen rectangles.
#![allow(clippy::module_name_repetitions)]

/// A rectangle in root window coordinates. x,y from top left.
#[derive(Clone, Debug, PartialEq, Eq, Copy, Default)]
pub struct Xyhw {
    pub x: i32,
    pub y: i32,
    pub h: i32,
    pub w: i32,
}

impl Xyhw {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, h, w }
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when both rectangles share at least one pixel.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let left = Xyhw::new(0, 0, 500, 100);
        let right = Xyhw::new(500, 0, 500, 100);
        assert!(!left.overlaps(&right));
        assert!(!right.overlaps(&left));
    }

    #[test]
    fn intersecting_rectangles_overlap() {
        let a = Xyhw::new(0, 0, 501, 100);
        let b = Xyhw::new(500, 50, 10, 10);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn a_rectangle_contains_itself() {
        let a = Xyhw::new(3, 4, 10, 10);
        assert!(a.contains(&a));
        assert!(!a.contains(&Xyhw::new(2, 4, 10, 10)));
    }
}
