// lib.rs - Conway's Game of Life engine, controller and rendering adapter

//! Conway's Game of Life on a toroidal grid.
//!
//! ## Architecture
//!
//! - [`engine`]: stateless grid algorithms (seeding, neighbour counts, the
//!   B3/S23 step). Every step builds a new [`Grid`] from the old one.
//! - [`SimulationController`]: owns the grid, the run/stop state and the
//!   tick schedule, and hands a [`RenderFrame`] to a [`Renderer`] after every
//!   change.
//! - [`driver`]: a tokio tick loop for running without a window.
//!
//! ## Usage
//!
//! ```no_run
//! use conway::{Config, LatestFrame, SimulationController, Viewport};
//! use std::time::Instant;
//!
//! let mut sim = SimulationController::new(
//!     Config::default(),
//!     Viewport::new(800.0, 600.0),
//!     LatestFrame::new(),
//! )
//! .unwrap();
//! sim.start();
//! sim.poll(Instant::now());
//! println!("{} cells alive", sim.renderer().frame().population());
//! ```

pub mod config;
pub mod controller;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod render;
pub mod viewport;

pub use config::{Config, Palette};
pub use controller::{RunState, SimulationController};
pub use error::ConfigError;
pub use grid::Grid;
pub use patterns::{PATTERNS, Pattern};
pub use render::{CellSprite, LatestFrame, NeighborBucket, RenderFrame, Renderer, Rgb};
pub use viewport::Viewport;
