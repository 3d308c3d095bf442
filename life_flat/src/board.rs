use life_lib::{Cell, Grid, GridSnapshot, SharedDisplay, Simulator};

use crate::engine;

/// Owns one grid & the generation it is on.
pub struct Board {
    /// The display data that is for the UI to render.
    display: SharedDisplay,

    /// The generation that this simulation is on.
    generation: u64,
    /// The grid that the simulation will take place on.
    grid: Grid,
}

impl Simulator for Board {
    fn new(grid: Grid, display: SharedDisplay) -> Self {
        Self {
            display,
            generation: 0,
            grid,
        }
    }

    fn tick(&mut self) {
        self.grid = engine::step(&self.grid);
        self.generation += 1;
    }

    fn update_display(&mut self) {
        let mut display = match self.display.lock() {
            Ok(display) => display,
            Err(_) => {
                log::error!("Ui panicked whilst holding the display, generation {} not published", self.generation);
                return;
            }
        };

        // The ui only ever needs the newest generation, so replace any snapshot it has not taken yet.
        *display = Some(GridSnapshot::new(self.generation, self.grid.clone()));
    }

    fn set(&mut self, index: usize, cell: Cell) {
        if index >= self.grid.len() {
            log::debug!("Ignoring edit of cell {index} outside of a {} cell grid", self.grid.len());
            return;
        }

        self.grid = engine::set_cell(&self.grid, index, cell.into());
        self.generation = 0;
    }

    fn get(&self, index: usize) -> Cell {
        engine::is_alive(&self.grid, index).into()
    }

    fn get_generation(&self) -> u64 {
        self.generation
    }

    fn reset(&mut self) {
        self.grid = engine::clear(&self.grid);
        self.generation = 0;
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }
}
