//! Flat row-major pixel grids and the HDR accumulation buffer.

use glam::Vec3;

/// Row-major index of pixel (x, y) in a grid `width` pixels wide
#[inline]
pub fn row_major(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Bounds-checked width×height array of per-pixel values
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: u32, height: u32, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checked index; panics when (x, y) lies outside the grid
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        row_major(x, y, self.width)
    }

    pub fn get(&self, x: u32, y: u32) -> &T {
        &self.cells[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> &mut T {
        let index = self.index(x, y);
        &mut self.cells[index]
    }

    /// All cells in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Consume the grid, returning its row-major cells
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }
}

/// Additive RGB accumulator, one cell per noise-field pixel
pub type HdrBuffer = Grid<Vec3>;

impl HdrBuffer {
    /// Zero-initialised buffer
    pub fn zeroed(width: u32, height: u32) -> Self {
        Self::new(width, height, Vec3::ZERO)
    }

    /// Add `colour` into cell (x, y). Callers must bounds-check first.
    #[inline]
    pub fn accumulate(&mut self, x: u32, y: u32, colour: Vec3) {
        *self.get_mut(x, y) += colour;
    }

    /// Current accumulated value at (x, y)
    pub fn read(&self, x: u32, y: u32) -> Vec3 {
        *self.get(x, y)
    }
}
