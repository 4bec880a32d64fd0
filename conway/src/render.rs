// render.rs - Rendering adapter between the controller and a drawing surface
//
// The core never draws. Each tick it hands a `RenderFrame` to a `Renderer`:
// one sprite per live cell, already laid out in pixels and tagged with its
// neighbour bucket. The presentation layer maps buckets to colours and
// paints rounded rectangles.

use serde::{Deserialize, Serialize};

use crate::engine::count_neighbors;
use crate::grid::Grid;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Live-neighbour count, collapsed to the four colour buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborBucket {
    Lonely,
    One,
    Two,
    /// Three or more.
    Crowded,
}

impl NeighborBucket {
    pub fn from_count(neighbors: u8) -> Self {
        match neighbors {
            0 => Self::Lonely,
            1 => Self::One,
            2 => Self::Two,
            _ => Self::Crowded,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Lonely => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Crowded => 3,
        }
    }
}

/// One live cell, positioned on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSprite {
    pub row: usize,
    pub col: usize,
    pub neighbors: u8,
    pub bucket: NeighborBucket,
    /// Left edge in pixels
    pub x: f32,
    /// Top edge in pixels
    pub y: f32,
    /// Width and height in pixels: `cell_size - 1`, leaving a one pixel gap
    /// between neighbours. Zero at a one pixel pitch.
    pub size: f32,
}

/// Everything needed to draw one generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
    pub generation: u64,
    pub sprites: Vec<CellSprite>,
}

impl RenderFrame {
    /// Lay out every live cell of `grid` at `cell_size` pixels per cell.
    pub fn from_grid(grid: &Grid, cell_size: f32, generation: u64) -> Self {
        let size = (cell_size - 1.0).max(0.0);
        let sprites = grid
            .alive_cells()
            .map(|(row, col)| {
                let neighbors = count_neighbors(grid, row as isize, col as isize);
                CellSprite {
                    row,
                    col,
                    neighbors,
                    bucket: NeighborBucket::from_count(neighbors),
                    x: col as f32 * cell_size,
                    y: row as f32 * cell_size,
                    size,
                }
            })
            .collect();

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cell_size,
            generation,
            sprites,
        }
    }

    pub fn population(&self) -> usize {
        self.sprites.len()
    }
}

/// Receives a frame after every tick, reset and resize.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame);
}

impl<F: FnMut(&RenderFrame)> Renderer for F {
    fn render(&mut self, frame: &RenderFrame) {
        self(frame)
    }
}

/// A renderer that only remembers the latest frame, for surfaces that
/// repaint on their own schedule.
#[derive(Debug, Default)]
pub struct LatestFrame {
    frame: RenderFrame,
    frames_received: u64,
}

impl LatestFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }
}

impl Renderer for LatestFrame {
    fn render(&mut self, frame: &RenderFrame) {
        self.frame.clone_from(frame);
        self.frames_received += 1;
    }
}
