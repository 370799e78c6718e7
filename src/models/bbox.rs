/// Axis-aligned pixel rectangle, inclusive on both ends
///
/// Origin is top-left, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Leftmost column
    pub min_x: u32,
    /// Topmost row
    pub min_y: u32,
    /// Rightmost column
    pub max_x: u32,
    /// Bottom row
    pub max_y: u32,
}

impl BoundingBox {
    /// Create a box from inclusive corners
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        debug_assert!(min_x <= max_x && min_y <= max_y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Single-pixel box at `(x, y)`
    pub fn at(x: u32, y: u32) -> Self {
        Self::new(x, y, x, y)
    }

    /// Grow the box so it contains `(x, y)`
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Number of columns covered
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Number of rows covered
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Pixel count of the rectangle
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// True when `(x, y)` lies inside the box
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) - ({}, {}) [{}x{}]",
            self.min_x,
            self.min_y,
            self.max_x,
            self.max_y,
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_grows_box() {
        let mut bbox = BoundingBox::at(5, 5);
        bbox.include(2, 7);
        bbox.include(9, 1);
        assert_eq!(bbox, BoundingBox::new(2, 1, 9, 7));
        assert_eq!(bbox.width(), 8);
        assert_eq!(bbox.height(), 7);
        assert_eq!(bbox.area(), 56);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bbox = BoundingBox::new(10, 5, 15, 8);
        assert!(bbox.contains(10, 5));
        assert!(bbox.contains(15, 8));
        assert!(!bbox.contains(16, 8));
        assert!(!bbox.contains(10, 4));
    }
}
