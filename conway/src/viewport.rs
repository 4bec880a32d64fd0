// viewport.rs - Drawing-surface size and its mapping to grid dimensions

use crate::grid::Grid;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `(rows, cols)` of whole cells that fit. Negative, NaN or infinite
    /// extents count as zero, and a surface needing more than
    /// [`MAX_CELLS`](crate::grid::MAX_CELLS) cells maps to `(0, 0)`.
    pub fn grid_dimensions(&self, cell_size: f32) -> (usize, usize) {
        let rows = cells_along(self.height, cell_size);
        let cols = cells_along(self.width, cell_size);
        if Grid::fits(rows, cols) { (rows, cols) } else { (0, 0) }
    }
}

fn cells_along(extent: f32, cell_size: f32) -> usize {
    if !extent.is_finite() || !cell_size.is_finite() || extent <= 0.0 || cell_size <= 0.0 {
        return 0;
    }
    (extent / cell_size).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_partial_cells() {
        assert_eq!(Viewport::new(805.0, 599.0).grid_dimensions(10.0), (59, 80));
        assert_eq!(Viewport::new(9.9, 10.0).grid_dimensions(10.0), (1, 0));
    }

    #[test]
    fn degenerate_sizes_map_to_zero() {
        assert_eq!(Viewport::new(0.0, 0.0).grid_dimensions(10.0), (0, 0));
        assert_eq!(Viewport::new(-50.0, f32::NAN).grid_dimensions(10.0), (0, 0));
        assert_eq!(Viewport::new(100.0, f32::INFINITY).grid_dimensions(10.0), (0, 10));
    }

    #[test]
    fn oversized_surfaces_map_to_zero() {
        assert_eq!(Viewport::new(f32::MAX, f32::MAX).grid_dimensions(10.0), (0, 0));
        assert_eq!(Viewport::new(1e30, 10.0).grid_dimensions(1.0), (0, 0));
        assert_eq!(Viewport::new(4096.0, 4096.0).grid_dimensions(1.0), (4096, 4096));
    }
}
