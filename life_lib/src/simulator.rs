use crate::{Cell, Grid, GridSnapshot, SharedDisplay};

/// An implementation of [`Simulator`] owns one grid & steps it through the generations of Conways game of life.
///
/// The generation counter belongs to the simulator: it increases by one for every [`Simulator::tick`] & returns to
/// zero whenever the grid is edited by hand or reset.
pub trait Simulator: Send {
    /// Creates a new simulator for the given grid, at generation 0.
    fn new(grid: Grid, display: SharedDisplay) -> Self
    where
        Self: Sized;

    /// Advances the simulation by one generation.
    fn tick(&mut self);

    /// Publishes the current grid for the ui to display.
    fn update_display(&mut self);

    /// Sets the cell at the given index on the grid.
    ///
    /// Indexes outside the grid are ignored.
    fn set(&mut self, index: usize, cell: Cell);

    /// Gets the cell at the given index on the grid.
    fn get(&self, index: usize) -> Cell;

    /// Flips the cell at the given index on the grid.
    fn toggle(&mut self, index: usize) {
        let cell = self.get(index).invert();
        self.set(index, cell);
    }

    /// Gets the current generation of simulation.
    fn get_generation(&self) -> u64;

    /// Sets all cells on the grid to dead & sets the generation to 0.
    fn reset(&mut self);

    /// The grid in its current state.
    fn grid(&self) -> &Grid;

    /// Creates an independent copy of the grid in its current state.
    fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.get_generation(), self.grid().clone())
    }
}
