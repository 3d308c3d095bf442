/// The row & column of a [`Cell`] on the grid.
///
/// To move "right" on the grid, the column must be increased.
/// To move "down" on the grid, the row must be increased.
///
/// [`Cell`]: crate::Cell
#[derive(
    Eq, Hash, PartialEq, Clone, Copy, Debug, Default, derive_more::From, derive_more::Display,
)]
#[display("({row}, {column})")]
pub struct GridPosition {
    pub(crate) row: usize,
    pub(crate) column: usize,
}

impl GridPosition {
    /// Creates a new [`GridPosition`] at the given row & column.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Moves the position by the given row & column offsets.
    ///
    /// Returns [`None`] if the result would be negative or overflow.
    pub fn offset(self, rows: usize, columns: usize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(rows)?,
            column: self.column.checked_add(columns)?,
        })
    }
}

impl std::str::FromStr for GridPosition {
    type Err = String;

    /// Parses a position written as `row,column`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let Some((row, column)) = text.split_once(',') else {
            return Err(format!("'{text}' is not in the form ROW,COLUMN"));
        };

        let row = row
            .trim()
            .parse()
            .map_err(|err| format!("Invalid row '{row}': {err}"))?;
        let column = column
            .trim()
            .parse()
            .map_err(|err| format!("Invalid column '{column}': {err}"))?;

        Ok(Self::new(row, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tuple() {
        let position: GridPosition = (3, 7).into();
        assert_eq!(position, GridPosition::new(3, 7));
        assert_eq!(position.to_string(), "(3, 7)");
    }

    #[test]
    fn parse_row_column() {
        assert_eq!("2, 5".parse::<GridPosition>(), Ok(GridPosition::new(2, 5)));
        assert!("2".parse::<GridPosition>().is_err());
        assert!("-1,3".parse::<GridPosition>().is_err());
    }

    #[test]
    fn offset_overflow() {
        assert_eq!(
            GridPosition::new(1, 1).offset(2, 3),
            Some(GridPosition::new(3, 4))
        );
        assert_eq!(GridPosition::new(usize::MAX, 0).offset(1, 0), None);
    }
}
