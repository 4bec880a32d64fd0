// engine.rs - Grid evolution: seeding, neighbour counting and the B3/S23 step
//
// Everything here is a free function over explicit `Grid` values. A new
// generation is always built into a fresh grid from a borrowed snapshot of
// the old one, so no cell can observe another cell's next state.

use std::sync::Arc;

use rand::Rng;

use crate::grid::Grid;

/// Offsets of the eight cells around `(0, 0)`.
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Seed a `rows × cols` grid where each cell is alive with probability
/// `alive_probability` (clamped to `[0, 1]`), one independent draw per cell.
///
/// A zero dimension yields the empty grid.
pub fn initialize<R: Rng>(
    rows: usize,
    cols: usize,
    alive_probability: f64,
    rng: &mut R,
) -> Grid {
    let p = if alive_probability.is_nan() { 0.0 } else { alive_probability.clamp(0.0, 1.0) };
    Grid::from_fn(rows, cols, |_, _| rng.random_bool(p))
}

/// Count the live cells among the eight around `(row, col)`, wrapping at
/// the edges.
///
/// On grids with a dimension of 1 or 2 the wrap makes some offsets land on
/// the same cell (or on the cell itself); each offset is still counted
/// once, so the result stays in `0..=8`.
pub fn count_neighbors(grid: &Grid, row: isize, col: isize) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dr, dc)| grid.is_alive(row + dr, col + dc))
        .count() as u8
}

/// Conway's rule: birth on 3, survival on 2 or 3.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// The next generation of `grid`.
pub fn step(grid: &Grid) -> Grid {
    let (rows, cols) = grid.dimensions();
    Grid::from_fn(rows, cols, |row, col| {
        let (row, col) = (row as isize, col as isize);
        next_state(grid.is_alive(row, col), count_neighbors(grid, row, col))
    })
}

/// Evaluate one row of the next generation, yielding after every cell.
async fn process_row(row: usize, current: Arc<Grid>) -> (usize, Vec<bool>) {
    let mut next_row = Vec::with_capacity(current.cols());
    for col in 0..current.cols() {
        let (r, c) = (row as isize, col as isize);
        next_row.push(next_state(current.is_alive(r, c), count_neighbors(&current, r, c)));
        tokio::task::yield_now().await;
    }
    (row, next_row)
}

/// The next generation of `grid`, computed with one task per row.
///
/// Rows interleave on the runtime and complete in whatever order it picks;
/// each task only reads the shared snapshot, so the result is identical to
/// [`step`].
pub async fn step_by_rows(grid: &Grid) -> Grid {
    let (rows, cols) = grid.dimensions();
    let snapshot = Arc::new(grid.clone());

    let handles: Vec<_> = (0..rows)
        .map(|row| tokio::spawn(process_row(row, Arc::clone(&snapshot))))
        .collect();

    let mut next_rows = vec![Vec::new(); rows];
    for handle in handles {
        match handle.await {
            Ok((row, cells)) => next_rows[row] = cells,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => panic!("row task cancelled: {err}"),
        }
    }

    Grid::from_fn(rows, cols, |row, col| next_rows[row][col])
}
