//! Well known starting patterns.

use crate::{Cell, Grid, GridPosition};

/// A named set of alive cells, given as `(row, column)` offsets from the top-left of the pattern.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

impl Pattern {
    /// Looks up a pattern by name, ignoring case.
    ///
    /// # Examples
    /// ```
    /// # use life_lib::pattern::Pattern;
    /// let blinker = Pattern::find("blinker").unwrap();
    /// assert_eq!(blinker.cells.len(), 3);
    /// assert!(Pattern::find("spaceship").is_none());
    /// ```
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS
            .iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }

    /// The amount of rows & columns the pattern covers.
    pub fn size(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(rows, columns), (row, column)| {
                (rows.max(row + 1), columns.max(column + 1))
            })
    }

    /// Sets the cells of this pattern alive, with the given position as the top-left of the pattern.
    ///
    /// Cells that would land outside the grid are skipped. Returns the amount of cells placed.
    pub fn place(&self, grid: &mut Grid, origin: GridPosition) -> usize {
        let mut placed = 0;
        for &(row, column) in self.cells {
            let Some(index) = origin
                .offset(row, column)
                .and_then(|position| grid.index_of(position))
            else {
                continue;
            };

            placed += grid.set(index, Cell::Alive) as usize;
        }

        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_ignores_case() {
        assert_eq!(Pattern::find("GLIDER").map(|p| p.name), Some("Glider"));
        assert_eq!(
            Pattern::find("r-pentomino").map(|p| p.name),
            Some("R-pentomino")
        );
    }

    #[test]
    fn pattern_sizes() {
        assert_eq!(Pattern::find("blinker").map(Pattern::size), Some((1, 3)));
        assert_eq!(Pattern::find("beacon").map(Pattern::size), Some((4, 4)));
    }

    #[test]
    fn place_block() {
        let mut grid = Grid::new(4, 4).expect("Valid dimensions");
        let block = Pattern::find("block").expect("Block exists");

        assert_eq!(block.place(&mut grid, GridPosition::new(1, 1)), 4);
        assert_eq!(grid.to_string(), "....\n.##.\n.##.\n....");
    }

    #[test]
    /// Cells that do not fit are skipped instead of wrapping onto the next row.
    fn place_clipped_at_edge() {
        let mut grid = Grid::new(4, 2).expect("Valid dimensions");
        let blinker = Pattern::find("blinker").expect("Blinker exists");

        assert_eq!(blinker.place(&mut grid, GridPosition::new(1, 2)), 2);
        assert_eq!(grid.to_string(), "....\n..##");
    }
}
