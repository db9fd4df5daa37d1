use std::fmt;

use crate::{Error, Result};

/// Row-major 2D container with checked lookups.
///
/// Built once, then shared by `&` borrow; there is no mutable accessor after
/// construction apart from [`Grid::set`], which builders use while filling it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn filled(rows: usize, cols: usize) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            Error::capacity(format!("grid {rows}x{cols} overflows usize"))
        })?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|e| {
            Error::allocation(format!("grid {rows}x{cols}: {e}"))
        })?;
        cells.resize(len, T::default());
        Ok(Self { rows, cols, cells })
    }
}

impl<T: Copy> Grid<T> {
    /// Builds a grid from nested rows; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<T>>, label: &str) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::invalid_input(format!(
                    "{label}: row {idx} has {} columns, expected {n_cols}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.offset(row, col).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let idx = self.offset(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // zero-width grids hold no cells, so the max(1) never yields a row
        self.cells.chunks_exact(self.cols.max(1))
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::bounds(format!(
                "cell ({row}, {col}) outside {}x{} grid",
                self.rows, self.cols
            )));
        }
        Ok(row * self.cols + col)
    }
}

impl<T: Copy + fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let line: Vec<String> = row.iter().map(|v| format!("{v:>2}")).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::Error;

    #[test]
    fn from_rows_keeps_row_major_order() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]], "t").expect("grid");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(1, 0).expect("cell"), 4);
        assert_eq!(grid.iter_rows().next(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]], "WaitMatrix")
            .expect_err("ragged rows should fail");
        assert!(err.to_string().contains("WaitMatrix: row 1 has 1 columns, expected 2"));
    }

    #[test]
    fn out_of_range_lookups_are_bounds_errors() {
        let grid: Grid<u64> = Grid::filled(2, 2).expect("grid");
        assert!(matches!(grid.get(2, 0), Err(Error::Bounds(_))));
        assert!(matches!(grid.get(0, 2), Err(Error::Bounds(_))));
    }

    #[test]
    fn set_then_get_round_trips_a_cell() {
        let mut grid: Grid<u64> = Grid::filled(3, 3).expect("grid");
        grid.set(2, 1, 17).expect("set");
        assert_eq!(grid.get(2, 1).expect("get"), 17);
        assert_eq!(grid.get(1, 2).expect("get"), 0);
        assert!(grid.set(3, 0, 1).is_err());
    }

    #[test]
    fn display_right_aligns_two_digit_cells() {
        let grid = Grid::from_rows(vec![vec![1, 12], vec![0, 3]], "t").expect("grid");
        assert_eq!(grid.to_string(), " 1 12\n 0  3\n");
    }

    #[test]
    fn zero_width_grid_has_no_rows_to_iterate() {
        let grid: Grid<u64> = Grid::from_rows(vec![vec![], vec![]], "t").expect("grid");
        assert_eq!(grid.iter_rows().count(), 0);
    }
}
