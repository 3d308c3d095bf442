//! Text output of published generations.

use std::io::{self, Write};

use life_lib::GridSnapshot;

/// Writes the generation counter followed by the grid & a blank line.
pub(crate) fn write_frame(out: &mut impl Write, snapshot: &GridSnapshot) -> io::Result<()> {
    writeln!(out, "generation: {}", snapshot.generation())?;
    writeln!(out, "{}", snapshot.grid())?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use life_lib::{Cell, Grid};

    use super::*;

    #[test]
    fn frame_layout() {
        let mut grid = Grid::new(3, 2).expect("Valid dimensions");
        grid.set(0, Cell::Alive);
        grid.set(4, Cell::Alive);

        let mut out = Vec::new();
        write_frame(&mut out, &GridSnapshot::new(7, grid)).expect("Writing to a vec");

        assert_eq!(
            String::from_utf8(out).expect("Valid utf8"),
            "generation: 7\n#..\n.#.\n\n"
        );
    }
}
