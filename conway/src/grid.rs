// grid.rs - Toroidal grid value type for Conway's Game of Life

use std::fmt;

/// Largest number of cells a grid may hold (16M, a 4096×4096 board).
pub const MAX_CELLS: usize = 1 << 24;

/// A rectangular field of alive/dead cells whose edges wrap around.
///
/// Cells are stored row-major in one buffer, so every row has the same
/// length by construction. Lookups take signed coordinates and wrap them
/// modulo the dimensions; row `-1` is the last row, column `cols` is column 0.
///
/// A grid with zero rows or zero columns is the empty grid: it has no cells,
/// every lookup reports a dead cell, and it evolves into itself.
///
/// Constructors panic when `rows × cols` exceeds [`MAX_CELLS`]; callers that
/// derive sizes from outside input go through [`Grid::fits`] first.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-dead grid of the given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| false)
    }

    /// Whether a `rows × cols` grid stays within [`MAX_CELLS`].
    pub fn fits(rows: usize, cols: usize) -> bool {
        rows.checked_mul(cols).is_some_and(|cells| cells <= MAX_CELLS)
    }

    /// The 0×0 grid.
    pub fn empty() -> Self {
        Self { rows: 0, cols: 0, cells: Vec::new() }
    }

    /// Build a grid by evaluating `alive` for every `(row, col)` in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut alive: impl FnMut(usize, usize) -> bool) -> Self {
        if rows == 0 || cols == 0 {
            return Self::empty();
        }
        assert!(Self::fits(rows, cols), "{rows}x{cols} grid exceeds {MAX_CELLS} cells");
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(alive(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    /// Build a grid from nested rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows are not all the same length. A ragged grid can only
    /// come from a construction bug, so it is rejected here rather than
    /// carried into the engine.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                cols,
                "row {index} has {} cells, expected {cols}",
                row.len()
            );
        }
        let height = rows.len();
        Self::from_fn(height, cols, |row, col| rows[row][col])
    }

    /// Parse a picture like `".#.\n.#.\n.#."`, where `#` or `O` is alive.
    /// Blank lines and surrounding whitespace are ignored.
    ///
    /// # Panics
    ///
    /// Panics on ragged input, like [`Grid::from_rows`].
    pub fn from_picture(picture: &str) -> Self {
        let rows = picture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| matches!(c, '#' | 'O')).collect())
            .collect();
        Self::from_rows(rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Wrap a signed coordinate onto the torus. `None` for the empty grid.
    pub fn wrap(&self, row: isize, col: isize) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        let row = row.rem_euclid(self.rows as isize) as usize;
        let col = col.rem_euclid(self.cols as isize) as usize;
        Some((row, col))
    }

    /// Whether the cell at the wrapped coordinate is alive.
    pub fn is_alive(&self, row: isize, col: isize) -> bool {
        self.wrap(row, col)
            .is_some_and(|(row, col)| self.cells[row * self.cols + col])
    }

    /// A copy of this grid with one (wrapped) cell set.
    pub fn with_cell(&self, row: isize, col: isize, alive: bool) -> Self {
        let mut next = self.clone();
        if let Some((row, col)) = self.wrap(row, col) {
            next.cells[row * self.cols + col] = alive;
        }
        next
    }

    /// A copy of this grid with one (wrapped) cell flipped.
    pub fn toggled(&self, row: isize, col: isize) -> Self {
        self.with_cell(row, col, !self.is_alive(row, col))
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every alive cell, row-major.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(index, _)| (index / cols, index % cols))
    }

    /// Row `row` as a slice. Not wrapped.
    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        for row in 0..self.rows {
            let line: String = self
                .row(row)
                .iter()
                .map(|&alive| if alive { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_negative_and_overflowing_coordinates() {
        let grid = Grid::new(3, 4).with_cell(0, 0, true);
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(-3, -4));
        assert!(grid.is_alive(3, 4));
        assert!(!grid.is_alive(2, 3));
        assert_eq!(grid.wrap(-1, -1), Some((2, 3)));
    }

    #[test]
    fn zero_dimension_is_empty() {
        for grid in [Grid::new(0, 5), Grid::new(5, 0), Grid::from_fn(0, 0, |_, _| true)] {
            assert!(grid.is_empty());
            assert_eq!(grid.dimensions(), (0, 0));
            assert!(!grid.is_alive(1, 1));
            assert_eq!(grid.population(), 0);
        }
    }

    #[test]
    fn size_limit_is_checked_without_overflow() {
        assert!(Grid::fits(4096, 4096));
        assert!(!Grid::fits(4097, 4096));
        assert!(!Grid::fits(usize::MAX, 2));
        assert!(Grid::fits(usize::MAX, 0));
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn oversized_grid_is_rejected() {
        Grid::new(usize::MAX, usize::MAX);
    }

    #[test]
    #[should_panic(expected = "row 1 has 2 cells")]
    fn ragged_rows_are_rejected() {
        Grid::from_rows(vec![vec![true, false, true], vec![false, true]]);
    }

    #[test]
    fn picture_parsing_and_alive_cells() {
        let grid = Grid::from_picture(
            "
            .#.
            ..#
            ###
            ",
        );
        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.population(), 5);
        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(alive, vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn toggling_leaves_the_original_untouched() {
        let before = Grid::new(2, 2);
        let after = before.toggled(1, 1);
        assert!(!before.is_alive(1, 1));
        assert!(after.is_alive(1, 1));
        assert!(!after.toggled(1, 1).is_alive(1, 1));
    }
}
