use crate::*;

/// A two-valued pixel matrix.
///
/// Rows are stored bottom-up: row 0 is the bottom row of the source image,
/// because the host's world coordinates grow upwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl PixelGrid {
    /// An all-dead grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Builds a grid from rows listed top-down (the order an image or a text
    /// file lists them in), validating the shape against `params`.
    pub fn from_top_down_rows(params: &Params, frame: usize, rows: &[Vec<bool>]) -> Result<Self> {
        if rows.len() != params.height {
            return Err(CodecError::DimensionMismatch {
                frame,
                axis: Axis::Rows,
                expected: params.height,
                found: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(params.width * params.height);

        for (row_idx, row) in rows.iter().enumerate().rev() {
            if row.len() != params.width {
                return Err(CodecError::DimensionMismatch {
                    frame,
                    axis: Axis::Columns { row: row_idx },
                    expected: params.width,
                    found: row.len(),
                });
            }

            cells.extend(row.iter().copied());
        }

        Ok(Self {
            width: params.width,
            height: params.height,
            cells,
        })
    }

    /// Parses a text grid of `0`/`1` characters, one line per row, top row
    /// first.
    pub fn parse(params: &Params, frame: usize, text: &str) -> Result<Self> {
        let rows = text
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(column, cell)| match cell {
                        '1' => Ok(true),
                        '0' => Ok(false),
                        cell => Err(CodecError::InvalidCell {
                            frame,
                            row,
                            column,
                            cell,
                        }),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_top_down_rows(params, frame, &rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y` (0-based, `y` counted from the bottom).
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.cells[y * self.width + x] = alive;
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn row(&self, y: usize) -> &[bool] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [bool] {
        &mut self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    /// All cells with their coordinates, row-major from the bottom row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &alive)| (idx % self.width, idx / self.width, alive))
    }

    pub(crate) fn check_shape(&self, params: &Params, frame: usize) -> Result<()> {
        if self.height != params.height {
            return Err(CodecError::DimensionMismatch {
                frame,
                axis: Axis::Rows,
                expected: params.height,
                found: self.height,
            });
        }

        if self.width != params.width {
            return Err(CodecError::DimensionMismatch {
                frame,
                axis: Axis::Columns { row: 0 },
                expected: params.width,
                found: self.width,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(width: usize, height: usize) -> Params {
        Params::new(width, height, 30).unwrap()
    }

    #[test]
    fn parse_reverses_rows() {
        let grid = PixelGrid::parse(&params(3, 2), 0, "100\n011\n").unwrap();

        assert_eq!(grid.row(0), &[false, true, true]);
        assert_eq!(grid.row(1), &[true, false, false]);
        assert!(grid.get(0, 1));
        assert!(!grid.get(0, 0));
    }

    #[test]
    fn parse_rejects_wrong_height() {
        let err = PixelGrid::parse(&params(3, 3), 4, "100\n011\n").unwrap_err();

        assert_eq!(
            err,
            CodecError::DimensionMismatch {
                frame: 4,
                axis: Axis::Rows,
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn parse_rejects_ragged_row() {
        let err = PixelGrid::parse(&params(3, 2), 0, "100\n01\n").unwrap_err();

        assert_eq!(
            err,
            CodecError::DimensionMismatch {
                frame: 0,
                axis: Axis::Columns { row: 1 },
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn parse_rejects_foreign_symbols() {
        let err = PixelGrid::parse(&params(3, 1), 2, "1#0").unwrap_err();

        assert_eq!(
            err,
            CodecError::InvalidCell {
                frame: 2,
                row: 0,
                column: 1,
                cell: '#',
            }
        );
    }

    #[test]
    fn cells_are_row_major_from_bottom() {
        let grid = PixelGrid::parse(&params(2, 2), 0, "10\n01").unwrap();
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(
            cells,
            vec![(0, 0, false), (1, 0, true), (0, 1, true), (1, 1, false)]
        );
    }
}
