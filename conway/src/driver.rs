// driver.rs - Headless tick loop on tokio timers

use tokio::time::{self, Instant};

use crate::controller::SimulationController;
use crate::render::Renderer;

/// Run `controller` until `generations` ticks have executed or it stops on
/// its own (a detected cycle with `stop_on_cycle`). Returns the number of
/// ticks executed.
///
/// Starts the controller if it is stopped. Each generation is computed with
/// one task per row; between ticks the loop sleeps on tokio's clock, so a
/// paused test clock drives it instantly.
pub async fn run<R: Renderer>(controller: &mut SimulationController<R>, generations: u64) -> u64 {
    let mut ticks = 0;
    if generations == 0 {
        return ticks;
    }
    controller.start();

    while ticks < generations {
        if controller.poll_by_rows(Instant::now().into_std()).await {
            ticks += 1;
            continue;
        }
        match controller.next_deadline() {
            Some(deadline) => time::sleep_until(Instant::from_std(deadline)).await,
            None => break,
        }
    }

    log::info!(
        "Headless run finished after {ticks} ticks at generation {} (population {})",
        controller.generation(),
        controller.population()
    );
    ticks
}
