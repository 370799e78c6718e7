/// Row-major 2D sample buffer shared by every pipeline stage
///
/// Greyscale maps, gradient magnitudes, binary masks and label maps are all
/// `Grid`s with the same `width`/`height` as the source image.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Binary mask: `0` is background, any nonzero value is foreground.
///
/// Thresholding and morphology write exactly `0` and [`FOREGROUND`].
pub type BinaryMask = Grid<u8>;

/// Label map: `0` is background, components are numbered from `1`.
pub type LabelMap = Grid<u32>;

/// Foreground value written by thresholding and morphology
pub const FOREGROUND: u8 = 255;

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with `T::default()`
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every sample set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major buffer
    ///
    /// Returns `None` when `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every sample
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Grid width (columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (rows)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the grid holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when `other` has the same dimensions
    pub fn same_size<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Sample at column `x`, row `y`
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Sample at `(x, y)`, or `None` outside the grid
    pub fn try_get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Set the sample at `(x, y)`; writes outside the grid are ignored
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = value;
    }

    /// Reset every sample to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// One row as a slice
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Raw row-major samples
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Raw row-major samples, mutable
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return its buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every sample, keeping the dimensions
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// True when `(x, y)` is on the outermost one-pixel ring
    #[inline]
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 >= self.width || y + 1 >= self.height
    }
}

impl<T: Copy + Default + PartialEq> Grid<T> {
    /// Number of samples different from `T::default()`
    pub fn count_nonzero(&self) -> usize {
        let zero = T::default();
        self.data.iter().filter(|&&v| v != zero).count()
    }
}

impl<T: Copy + Default> Default for Grid<T> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
