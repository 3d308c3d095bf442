//! Contains [`GridSnapshot`].
//! See its documentation for more information.

use crate::{Cell, Grid};

/// A copy of the grid at a given generation, published for the presentation layer to render.
///
/// The snapshot owns its grid, so the presentation layer can never mutate the grid the simulator is stepping.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GridSnapshot {
    /// The generation of the grid to be displayed.
    generation: u64,
    grid: Grid,
}

impl GridSnapshot {
    /// Constructs a new [`GridSnapshot`] with the given generation & the given grid to display.
    pub fn new(generation: u64, grid: Grid) -> Self {
        Self { generation, grid }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Gets the cell at the given index.
    ///
    /// If the given index is outside the bounds of the grid then [`Cell::Dead`] will be returned.
    pub fn get_cell(&self, index: usize) -> Cell {
        self.grid.get(index)
    }
}
