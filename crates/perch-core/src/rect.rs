use serde::Serialize;

/// A rectangle in virtual-desktop pixel coordinates.
///
/// `right()` and `bottom()` are exclusive, so a bar docked at the top of
/// a monitor with height 60 covers rows `y..y + 60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from Win32-style `left, top, right, bottom` edges.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns whether the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_round_trip_through_from_edges() {
        // Arrange
        let rect = Rect::from_edges(1920, 0, 3440, 1080);

        // Assert
        assert_eq!(rect, Rect::new(1920, 0, 1520, 1080));
        assert_eq!(rect.right(), 3440);
        assert_eq!(rect.bottom(), 1080);
    }

    #[test]
    fn contains_treats_right_and_bottom_as_exclusive() {
        let rect = Rect::new(0, 0, 100, 50);

        assert!(rect.contains(0, 0));
        assert!(rect.contains(99, 49));
        assert!(!rect.contains(100, 10));
        assert!(!rect.contains(10, 50));
    }

    #[test]
    fn union_covers_both_rectangles() {
        let a = Rect::new(0, 0, 100, 40);
        let b = Rect::new(0, 20, 100, 200);

        assert_eq!(a.union(&b), Rect::new(0, 0, 100, 220));
    }

    #[test]
    fn union_ignores_empty_rectangles() {
        let a = Rect::new(10, 10, 5, 5);

        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&a), a);
    }
}
