//! Contains [`Grid`], the fixed size board that the cells inhabit.

use std::{
    fmt,
    hash::{Hash, Hasher},
    num::NonZeroUsize,
};

use bitvec::{boxed::BitBox, slice::BitSlice, vec::BitVec};

use crate::{Cell, GridPosition};

/// How neighbour lookups treat the left & right edges of the grid.
///
/// Lookups that fall before the first cell or after the last cell are dead in both modes.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Neighbours are found by adding fixed offsets to the flat index.
    ///
    /// A cell in the leftmost column sees the rightmost cells of the rows above, level with & below it as
    /// neighbours (and the reverse for the rightmost column).
    #[default]
    FlatIndex,
    /// Neighbours outside the grid in either axis are dead.
    Clipped,
}

/// The possible errors when constructing a [`Grid`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(kinded::Kinded))]
pub enum GridError {
    #[error("Grid dimensions must be positive. 'width: {width}' : 'height: {height}'")]
    ZeroDimension { width: usize, height: usize },
    #[error("A grid of {width} by {height} cells is too large for your computer.")]
    TooLarge { width: usize, height: usize },
    #[error(
        "Cell data does not match the area allocated for this grid. 'data: {data_size}' : 'allocated: {allocated_size}'"
    )]
    UnexpectedSize {
        data_size: usize,
        allocated_size: usize,
    },
}

/// A rectangular grid of cells, stored row by row in a single bit sequence.
///
/// The cell at `row` & `column` is stored at index `row * width + column`.
/// The width & height are fixed for the lifetime of the grid.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: NonZeroUsize,
    height: NonZeroUsize,
    boundary: Boundary,
    cells: BitBox,
}

impl Grid {
    /// Constructs a grid of the given size with every cell dead.
    ///
    /// # Examples
    /// ```
    /// # use life_lib::{Cell, Grid};
    /// let grid = Grid::new(4, 3).unwrap();
    /// assert_eq!(grid.len(), 12);
    /// assert_eq!(grid.get(5), Cell::Dead);
    ///
    /// assert!(Grid::new(0, 3).is_err());
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let (width, height, size) = Self::dimensions(width, height)?;

        Ok(Self {
            width,
            height,
            boundary: Boundary::default(),
            cells: BitVec::repeat(false, size).into_boxed_bitslice(),
        })
    }

    /// Constructs a grid of the given size from existing cell data laid out row by row.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: impl Into<BitBox>,
    ) -> Result<Self, GridError> {
        let (width, height, size) = Self::dimensions(width, height)?;
        let cells = cells.into();

        if cells.len() != size {
            return Err(GridError::UnexpectedSize {
                data_size: cells.len(),
                allocated_size: size,
            });
        }

        Ok(Self {
            width,
            height,
            boundary: Boundary::default(),
            cells,
        })
    }

    /// Validates the dimensions & returns them along with the amount of cells they hold.
    fn dimensions(
        width: usize,
        height: usize,
    ) -> Result<(NonZeroUsize, NonZeroUsize, usize), GridError> {
        let (Some(non_zero_width), Some(non_zero_height)) =
            (NonZeroUsize::new(width), NonZeroUsize::new(height))
        else {
            return Err(GridError::ZeroDimension { width, height });
        };

        // Neighbour offsets are computed as signed values so the area must fit in an isize.
        let size = width
            .checked_mul(height)
            .filter(|size| isize::try_from(*size).is_ok())
            .ok_or(GridError::TooLarge { width, height })?;

        Ok((non_zero_width, non_zero_height, size))
    }

    /// Sets how neighbour lookups treat the edges of the grid.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Gets the amount of cells in each row.
    pub fn width(&self) -> usize {
        self.width.get()
    }

    /// Gets the amount of rows.
    pub fn height(&self) -> usize {
        self.height.get()
    }

    /// Gets the total amount of cells, `width * height`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A grid always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// The cells of the grid laid out row by row.
    pub fn cells(&self) -> &BitSlice {
        &self.cells
    }

    /// Mutable access to the cells. The length of the slice cannot be changed.
    pub fn cells_mut(&mut self) -> &mut BitSlice {
        &mut self.cells
    }

    /// Converts a position into the index of the cell it refers to.
    ///
    /// Returns [`None`] if the position is outside the grid.
    pub fn index_of(&self, position: impl Into<GridPosition>) -> Option<usize> {
        let GridPosition { row, column } = position.into();

        if row >= self.height() || column >= self.width() {
            return None;
        }

        Some(row * self.width() + column)
    }

    /// Gets the cell at the given index.
    ///
    /// If the index is outside the grid then [`Cell::Dead`] will be returned.
    pub fn get(&self, index: usize) -> Cell {
        self.cells.get(index).is_some_and(|cell| *cell).into()
    }

    /// Sets the cell at the given index.
    ///
    /// Returns false, leaving the grid untouched, if the index is outside the grid.
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        if index >= self.len() {
            return false;
        }

        self.cells.set(index, cell.into());
        true
    }

    /// The amount of alive cells on the grid.
    pub fn alive_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// A hash of the cell states.
    ///
    /// Two grids with the same cells have the same fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = highway::HighwayHasher::default();
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Display for Grid {
    /// Writes one line per row, with `#` for alive cells & `.` for dead cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(self.width()).enumerate() {
            if row_index != 0 {
                writeln!(f)?;
            }

            for cell in row.iter().by_vals() {
                write!(f, "{}", Cell::from(cell))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bitvec::bitvec;
    use kinded::Kinded;

    use super::*;

    #[test]
    /// A new grid has every cell dead.
    fn dead_by_default() {
        let grid = Grid::new(7, 3).expect("Valid dimensions");

        assert_eq!(grid.len(), 21);
        assert_eq!(grid.alive_count(), 0);
        for index in 0..grid.len() {
            assert_eq!(grid.get(index), Cell::Dead);
        }
    }

    #[test]
    fn zero_dimensions_rejected() {
        for (width, height) in [(0, 5), (5, 0), (0, 0)] {
            let error = Grid::new(width, height).expect_err("Zero sized grid must be rejected");
            assert_eq!(error.kind(), GridErrorKind::ZeroDimension);
        }
    }

    #[test]
    fn overflowing_dimensions_rejected() {
        let error = Grid::new(usize::MAX, 2).expect_err("Grid must be too large");
        assert_eq!(error.kind(), GridErrorKind::TooLarge);
    }

    #[test]
    /// Cell data must match the area of the grid.
    fn from_cells_wrong_length() {
        let error = Grid::from_cells(3, 3, bitvec![1; 8])
            .expect_err("Mismatched data must be rejected");

        assert_eq!(
            error,
            GridError::UnexpectedSize {
                data_size: 8,
                allocated_size: 9
            }
        );
    }

    #[test]
    fn index_of_position() {
        let grid = Grid::new(5, 4).expect("Valid dimensions");

        assert_eq!(grid.index_of((0, 0)), Some(0));
        assert_eq!(grid.index_of((2, 3)), Some(13));
        assert_eq!(grid.index_of((4, 0)), None);
        assert_eq!(grid.index_of((0, 5)), None);
        assert_eq!(grid.index_of(GridPosition::new(3, 4)), Some(19));
    }

    #[test]
    /// Setting outside the grid is ignored.
    fn set_out_of_range() {
        let mut grid = Grid::new(2, 2).expect("Valid dimensions");

        assert!(!grid.set(4, Cell::Alive));
        assert_eq!(grid.alive_count(), 0);

        assert!(grid.set(3, Cell::Alive));
        assert_eq!(grid.get(3), Cell::Alive);
        assert_eq!(grid.get(4), Cell::Dead);
    }

    #[test]
    fn display_rows() {
        let mut grid = Grid::new(3, 2).expect("Valid dimensions");
        grid.set(1, Cell::Alive);
        grid.set(5, Cell::Alive);

        assert_eq!(grid.to_string(), ".#.\n..#");
    }

    #[test]
    /// The fingerprint only depends on the cell states.
    fn fingerprint_tracks_cells() {
        let mut grid_a = Grid::new(4, 4).expect("Valid dimensions");
        let mut grid_b = Grid::new(4, 4)
            .expect("Valid dimensions")
            .with_boundary(Boundary::Clipped);
        assert_eq!(grid_a.fingerprint(), grid_b.fingerprint());

        grid_a.set(6, Cell::Alive);
        assert_ne!(grid_a.fingerprint(), grid_b.fingerprint());

        grid_b.set(6, Cell::Alive);
        assert_eq!(grid_a.fingerprint(), grid_b.fingerprint());
    }

    #[test]
    fn boundary_serialises_snake_case() {
        let text = serde_json::to_string(&Boundary::FlatIndex).expect("Serialisable");
        assert_eq!(text, "\"flat_index\"");

        let boundary: Boundary = serde_json::from_str("\"clipped\"").expect("Valid boundary");
        assert_eq!(boundary, Boundary::Clipped);
    }
}
