//! The generation stepping functions.
//!
//! Every function here is pure: it reads the given grid & returns a new one, leaving the input untouched.

use bitvec::{boxed::BitBox, slice::BitSlice, vec::BitVec};

use life_lib::{Boundary, Cell, Grid};

/// The rule of Conways game of life: the next state of a cell given its state & its amount of alive neighbours.
pub fn next_state(alive: bool, neighbours: u8) -> bool {
    match (alive, neighbours) {
        // Survival
        (true, 2 | 3) => true,
        // Birth
        (false, 3) => true,
        // Under & over population
        _ => false,
    }
}

/// Counts the alive neighbours of the cell at the given index.
///
/// Neighbours that fall before the first cell or after the last cell count as dead.
/// With [`Boundary::FlatIndex`] the neighbours are the cells at the flat offsets
/// `-width-1, -width, -width+1, -1, +1, +width-1, +width, +width+1`, so cells on the left & right edges see
/// cells on the opposite edge of the adjacent rows.
///
/// # Panics
/// If the width is zero.
pub fn count_alive_neighbours(
    cells: &BitSlice,
    width: usize,
    index: usize,
    boundary: Boundary,
) -> u8 {
    assert!(width > 0, "A grid must have a width of at least one cell");

    let is_alive = |neighbour: Option<usize>| {
        neighbour
            .and_then(|neighbour| cells.get(neighbour))
            .is_some_and(|cell| *cell) as u8
    };

    match boundary {
        Boundary::FlatIndex => {
            let width = width as isize;
            [
                -width - 1,
                -width,
                -width + 1,
                -1,
                1,
                width - 1,
                width,
                width + 1,
            ]
            .into_iter()
            .map(|offset| is_alive(index.checked_add_signed(offset)))
            .sum()
        }
        Boundary::Clipped => {
            let row = index / width;
            let column = index % width;

            let mut surrounding = 0;
            for neighbour_row in row.saturating_sub(1)..=row + 1 {
                for neighbour_column in column.saturating_sub(1)..=column + 1 {
                    if (neighbour_row, neighbour_column) == (row, column) || neighbour_column >= width {
                        continue;
                    }

                    surrounding += is_alive(Some(neighbour_row * width + neighbour_column));
                }
            }
            surrounding
        }
    }
}

/// Computes the next generation of the given cells, laid out row by row.
///
/// Every cell is computed from the given generation only, never from cells already computed in this step.
///
/// # Panics
/// If the amount of cells is not `width * height`.
pub fn step_cells(cells: &BitSlice, width: usize, height: usize, boundary: Boundary) -> BitBox {
    assert_eq!(
        Some(cells.len()),
        width.checked_mul(height),
        "The grid must hold exactly width * height ({width} * {height}) cells"
    );

    let mut next: BitVec = BitVec::with_capacity(cells.len());
    for (index, alive) in cells.iter().by_vals().enumerate() {
        let neighbours = count_alive_neighbours(cells, width, index, boundary);
        next.push(next_state(alive, neighbours));
    }

    next.into_boxed_bitslice()
}

/// Computes the next generation of the grid.
pub fn step(grid: &Grid) -> Grid {
    let next_cells = step_cells(grid.cells(), grid.width(), grid.height(), grid.boundary());

    let mut next = grid.clone();
    next.cells_mut().copy_from_bitslice(&next_cells);
    next
}

/// Returns a grid of the same size with every cell dead.
pub fn clear(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    next.cells_mut().fill(false);
    next
}

/// Returns a copy of the grid with the cell at the given index set.
///
/// If the index is outside the grid the copy is unchanged.
pub fn set_cell(grid: &Grid, index: usize, alive: bool) -> Grid {
    let mut next = grid.clone();
    next.set(index, Cell::from(alive));
    next
}

/// Returns true if the cell at the given index is alive. Indexes outside the grid are dead.
pub fn is_alive(grid: &Grid, index: usize) -> bool {
    grid.get(index).is_alive()
}
