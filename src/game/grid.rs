use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

/// Index struct to access elements in the [`Grid`].
/// Row 0 is the bottom row of the board, column 0 is the leftmost column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridIndex {
    row: usize,
    col: usize,
}

impl From<(usize, usize)> for GridIndex {
    fn from(value: (usize, usize)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for GridIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl GridIndex {
    /// Constructs a new [`GridIndex`].
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns value of `self.row`
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns value of `self.col`
    pub fn col(&self) -> usize {
        self.col
    }
}

/// Per-step (row, col) offset of a scan direction.
/// A single signed delta pair covers all eight directions, so scans along
/// any axis share one iterator type.
pub type Step = (isize, isize);

/// Two-dimensional rectangular storage with dimensions fixed at construction.
/// Stored row-major; never resized after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Creates a grid of `width` x `height` default-valued cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if `index` lies inside the grid.
    pub fn contains(&self, index: GridIndex) -> bool {
        index.row < self.height && index.col < self.width
    }

    /// Applies `step` to `index`, returning [`None`] when the result leaves
    /// the grid.
    pub fn offset(&self, index: GridIndex, step: Step) -> Option<GridIndex> {
        let row = index.row.checked_add_signed(step.0)?;
        let col = index.col.checked_add_signed(step.1)?;
        let next = GridIndex::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Returns an iterator walking from `pos` in the direction of `step`,
    /// yielding indexed cells until it leaves the grid. The first yielded
    /// element is `pos` itself.
    pub fn ray_iter(&self, pos: GridIndex, step: Step) -> RayIterator<T> {
        RayIterator {
            current: self.contains(pos).then_some(pos),
            step,
            grid: self,
        }
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for cell in &mut self.cells {
            *cell = value.clone();
        }
    }
}

impl<T> Index<GridIndex> for Grid<T> {
    type Output = T;

    fn index(&self, index: GridIndex) -> &Self::Output {
        assert!(self.contains(index), "grid index {} out of bounds", index);
        &self.cells[index.row * self.width + index.col]
    }
}

impl<T> IndexMut<GridIndex> for Grid<T> {
    fn index_mut(&mut self, index: GridIndex) -> &mut Self::Output {
        assert!(self.contains(index), "grid index {} out of bounds", index);
        &mut self.cells[index.row * self.width + index.col]
    }
}

/// An iterator walking in a straight line over a [`Grid`].
/// On each step it applies the same signed offset to the underlying
/// [`GridIndex`] and stops when it leaves the grid.
pub struct RayIterator<'a, T> {
    current: Option<GridIndex>,
    step: Step,
    grid: &'a Grid<T>,
}

impl<'a, T> Iterator for RayIterator<'a, T> {
    type Item = (GridIndex, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.grid.offset(current, self.step);
        Some((current, &self.grid[current]))
    }
}
