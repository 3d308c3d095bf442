/// Represents the state of a cell on the grid.
///
/// An alive cell is represented as `true`.
/// A dead cell is represented as `false`.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, derive_more::Display)]
pub enum Cell {
    #[default]
    #[display(".")]
    Dead,
    #[display("#")]
    Alive,
}

impl From<Cell> for bool {
    fn from(value: Cell) -> Self {
        match value {
            Cell::Alive => true,
            Cell::Dead => false,
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        match value {
            true => Cell::Alive,
            false => Cell::Dead,
        }
    }
}

impl Cell {
    /// Returns the opposite of the current cell.
    pub fn invert(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    /// Returns true if the cell is alive.
    pub fn is_alive(self) -> bool {
        self.into()
    }
}
