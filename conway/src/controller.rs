// controller.rs - Run/stop state and tick scheduling around the grid engine

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::engine;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::patterns::Pattern;
use crate::render::{RenderFrame, Renderer};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Owns the current grid and drives it one generation per tick.
///
/// The host calls [`poll`](Self::poll) from its frame or timer loop; a tick
/// runs only while `Running` and only once its deadline has passed. Every
/// tick, reset and resize hands a fresh [`RenderFrame`] to the renderer.
pub struct SimulationController<R: Renderer> {
    config: Config,
    viewport: Viewport,
    grid: Grid,
    state: RunState,
    next_tick: Option<Instant>,
    generation: u64,
    rng: ChaCha8Rng,
    history: VecDeque<u64>,
    cycle_detected: bool,
    renderer: R,
}

impl<R: Renderer> SimulationController<R> {
    /// Validate `config`, seed a grid sized to `viewport` and render it once.
    pub fn new(config: Config, viewport: Viewport, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("Seeding simulation with seed {seed}");

        let mut controller = Self {
            config,
            viewport,
            grid: Grid::empty(),
            state: RunState::Stopped,
            next_tick: None,
            generation: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            history: VecDeque::new(),
            cycle_detected: false,
            renderer,
        };
        controller.reseed();
        controller.render();
        Ok(controller)
    }

    /// Begin running; the first tick is due immediately. No-op when running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = RunState::Running;
        self.next_tick = Some(Instant::now());
        log::info!("Simulation started at generation {}", self.generation);
    }

    /// Stop running and drop the pending tick. No-op when stopped.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = RunState::Stopped;
        self.next_tick = None;
        log::info!("Simulation stopped at generation {}", self.generation);
    }

    pub fn toggle(&mut self) {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
    }

    /// Stop, reseed the grid from the current viewport and render it.
    pub fn reset(&mut self) {
        self.stop();
        self.reseed();
        log::info!("Simulation reset: {}x{} grid", self.grid.rows(), self.grid.cols());
        self.render();
    }

    /// Adopt a new viewport and reseed a grid that fits it.
    ///
    /// The run state is left alone, so a running simulation keeps running
    /// on the new random grid.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reseed();
        log::info!(
            "Viewport resized to {}x{}px: {}x{} grid",
            viewport.width,
            viewport.height,
            self.grid.rows(),
            self.grid.cols()
        );
        self.render();
    }

    /// Run one tick if running and due. Returns whether a tick ran.
    ///
    /// At most one generation advances per call; a late poll does not catch
    /// up, it schedules the next tick one frame delay after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        let next = engine::step(&self.grid);
        self.finish_tick(next, now);
        true
    }

    /// [`poll`](Self::poll), with the generation computed by one tokio task
    /// per row ([`engine::step_by_rows`]).
    pub async fn poll_by_rows(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        let next = engine::step_by_rows(&self.grid).await;
        self.finish_tick(next, now);
        true
    }

    /// Advance exactly one generation regardless of run state. The schedule
    /// is untouched.
    pub fn step_once(&mut self) {
        let next = engine::step(&self.grid);
        self.advance(next);
    }

    /// Flip one cell (coordinates wrap) and render. Cycle history restarts
    /// from the edited grid.
    pub fn toggle_cell(&mut self, row: isize, col: isize) {
        self.grid = self.grid.toggled(row, col);
        self.restart_history();
        self.render();
    }

    /// Stop and replace the grid with `pattern` centred on an empty grid.
    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        self.stop();
        let (rows, cols) = self.viewport.grid_dimensions(self.config.cell_size);
        self.replace_grid(pattern.centered_on(&Grid::new(rows, cols)));
        log::info!("Applied pattern {}", pattern.name);
        self.render();
    }

    /// Stop and kill every cell.
    pub fn clear(&mut self) {
        self.stop();
        let (rows, cols) = self.viewport.grid_dimensions(self.config.cell_size);
        self.replace_grid(Grid::new(rows, cols));
        self.render();
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// When the next tick is due; `None` while stopped.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a generation repeated one from recent history.
    pub fn cycle_detected(&self) -> bool {
        self.cycle_detected
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn is_due(&self, now: Instant) -> bool {
        self.is_running() && self.next_tick.is_some_and(|deadline| now >= deadline)
    }

    fn finish_tick(&mut self, next: Grid, now: Instant) {
        self.advance(next);
        // advance() may have stopped us on a detected cycle.
        self.next_tick = self.is_running().then(|| now + self.config.frame_delay());
    }

    fn advance(&mut self, next: Grid) {
        self.grid = next;
        self.generation += 1;
        log::debug!("Generation {}: population {}", self.generation, self.grid.population());
        self.render();
        self.check_for_cycle();
    }

    fn reseed(&mut self) {
        let (rows, cols) = self.viewport.grid_dimensions(self.config.cell_size);
        let grid = engine::initialize(rows, cols, self.config.alive_probability, &mut self.rng);
        self.replace_grid(grid);
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
        self.restart_history();
    }

    fn restart_history(&mut self) {
        self.cycle_detected = false;
        self.history.clear();
        self.remember(hash_grid(&self.grid));
    }

    fn check_for_cycle(&mut self) {
        let hash = hash_grid(&self.grid);
        if self.history.contains(&hash) {
            if !self.cycle_detected {
                log::info!("Cycle detected at generation {}", self.generation);
            }
            self.cycle_detected = true;
            if self.config.stop_on_cycle {
                self.stop();
            }
        }
        self.remember(hash);
    }

    fn remember(&mut self, hash: u64) {
        if self.config.cycle_history == 0 {
            return;
        }
        if self.history.len() == self.config.cycle_history {
            self.history.pop_front();
        }
        self.history.push_back(hash);
    }

    fn render(&mut self) {
        let frame = RenderFrame::from_grid(&self.grid, self.config.cell_size, self.generation);
        self.renderer.render(&frame);
    }
}

fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;
    use crate::render::LatestFrame;
    use std::time::Duration;

    fn controller(config: Config) -> SimulationController<LatestFrame> {
        SimulationController::new(config, Viewport::new(200.0, 100.0), LatestFrame::new()).unwrap()
    }

    fn seeded() -> Config {
        Config { seed: Some(11), ..Config::default() }
    }

    #[test]
    fn starts_stopped_with_viewport_dimensions() {
        let c = controller(seeded());
        assert_eq!(c.state(), RunState::Stopped);
        assert_eq!(c.dimensions(), (10, 20));
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.renderer().frames_received(), 1);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = Config { alive_probability: -0.1, ..Config::default() };
        let viewport = Viewport::new(10.0, 10.0);
        let result = SimulationController::new(config, viewport, LatestFrame::new());
        assert!(result.is_err());
    }

    #[test]
    fn oversized_viewport_gives_empty_grid() {
        let viewport = Viewport::new(f32::MAX, f32::MAX);
        let mut c = SimulationController::new(seeded(), viewport, LatestFrame::new()).unwrap();
        assert!(c.grid().is_empty());
        c.resize(Viewport::new(1e30, 1e30));
        assert!(c.grid().is_empty());
        c.resize(Viewport::new(40.0, 30.0));
        assert_eq!(c.dimensions(), (3, 4));
    }

    #[tokio::test]
    async fn row_task_poll_matches_sequential_poll() {
        let mut sequential = controller(seeded());
        let mut by_rows = controller(seeded());
        assert_eq!(sequential.grid(), by_rows.grid());
        sequential.start();
        by_rows.start();

        let mut now = Instant::now();
        for _ in 0..3 {
            now += Duration::from_secs(1);
            assert!(sequential.poll(now));
            assert!(by_rows.poll_by_rows(now).await);
        }
        assert_eq!(sequential.grid(), by_rows.grid());
        assert_eq!(by_rows.generation(), 3);
        assert_eq!(by_rows.next_deadline(), sequential.next_deadline());

        by_rows.stop();
        assert!(!by_rows.poll_by_rows(now + Duration::from_secs(5)).await);
    }

    #[test]
    fn poll_respects_deadline_and_runs_one_tick() {
        let mut c = controller(seeded());
        c.start();
        let first = c.next_deadline().unwrap();

        assert!(c.poll(first + Duration::from_secs(60)));
        assert_eq!(c.generation(), 1);

        let next = c.next_deadline().unwrap();
        assert_eq!(next, first + Duration::from_secs(60) + c.config().frame_delay());
        assert!(!c.poll(next - Duration::from_millis(1)));
        assert_eq!(c.generation(), 1);
        assert!(c.poll(next));
        assert_eq!(c.generation(), 2);
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let mut c = controller(seeded());
        c.start();
        let due = c.next_deadline().unwrap();
        c.stop();
        assert!(!c.poll(due + Duration::from_secs(1)));
        assert_eq!(c.generation(), 0);
        assert_eq!(c.renderer().frames_received(), 1);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut c = controller(seeded());
        c.stop();
        assert_eq!(c.state(), RunState::Stopped);
        assert_eq!(c.next_deadline(), None);

        c.start();
        let deadline = c.next_deadline();
        c.start();
        assert_eq!(c.next_deadline(), deadline);
        assert_eq!(c.renderer().frames_received(), 1);
    }

    #[test]
    fn toggle_flips_state() {
        let mut c = controller(seeded());
        c.toggle();
        assert!(c.is_running());
        c.toggle();
        assert!(!c.is_running());
    }

    #[test]
    fn step_once_works_while_stopped() {
        let mut c = controller(seeded());
        let expected = engine::step(c.grid());
        c.step_once();
        assert_eq!(c.grid(), &expected);
        assert_eq!(c.generation(), 1);
        assert_eq!(c.state(), RunState::Stopped);
        assert_eq!(c.renderer().frame().generation, 1);
    }

    #[test]
    fn reset_stops_and_reseeds() {
        let mut c = controller(seeded());
        c.start();
        c.poll(Instant::now() + Duration::from_secs(1));
        c.reset();
        assert_eq!(c.state(), RunState::Stopped);
        assert_eq!(c.generation(), 0);
        assert_eq!(c.dimensions(), (10, 20));
        assert_eq!(c.renderer().frames_received(), 3);
    }

    #[test]
    fn resize_keeps_running() {
        let mut c = controller(seeded());
        c.start();
        c.resize(Viewport::new(55.0, 42.0));
        assert!(c.is_running());
        assert_eq!(c.dimensions(), (4, 5));
        assert_eq!(c.viewport(), Viewport::new(55.0, 42.0));
    }

    #[test]
    fn zero_viewport_gives_empty_grid() {
        let mut c = controller(seeded());
        c.resize(Viewport::new(0.0, 0.0));
        assert!(c.grid().is_empty());
        c.start();
        assert!(c.poll(Instant::now() + Duration::from_secs(1)));
        assert!(c.grid().is_empty());
    }

    #[test]
    fn stop_on_cycle_halts_a_blinker() {
        let mut c = controller(Config { stop_on_cycle: true, ..seeded() });
        c.apply_pattern(patterns::find("Blinker").unwrap());
        assert_eq!(c.population(), 3);
        c.start();

        let mut now = Instant::now();
        for _ in 0..5 {
            now += Duration::from_secs(1);
            c.poll(now);
        }
        assert!(c.cycle_detected());
        assert_eq!(c.state(), RunState::Stopped);
        assert_eq!(c.generation(), 2);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn cycles_are_reported_without_stopping_by_default() {
        let mut c = controller(seeded());
        c.apply_pattern(patterns::find("Beacon").unwrap());
        c.step_once();
        assert!(!c.cycle_detected());
        c.step_once();
        assert!(c.cycle_detected());
    }

    #[test]
    fn toggle_cell_and_clear() {
        let mut c = controller(seeded());
        c.clear();
        assert_eq!(c.population(), 0);
        c.toggle_cell(-1, -1);
        assert!(c.grid().is_alive(9, 19));
        assert_eq!(c.renderer().frame().population(), 1);
    }

    #[test]
    fn hand_drawn_still_life_is_a_cycle_after_one_step() {
        let mut c = controller(seeded());
        c.clear();
        for (row, col) in [(3, 3), (3, 4), (4, 3), (4, 4)] {
            c.toggle_cell(row, col);
        }
        assert!(!c.cycle_detected());
        c.step_once();
        assert!(c.cycle_detected());
    }
}
