use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::control::{Controller, Proportional};
use crate::error::SimError;
use crate::model::{BeltConstants, ControlParameters, StepSnapshot};

use super::engine::Engine;

/// Default run length: 400 steps of 0.05 s, 20 simulated seconds.
pub const DEFAULT_NUM_STEPS: usize = 400;

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

/// Wall-clock pacing between steps. Purely presentational: the numbers are
/// identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep `dt` of wall-clock time after each step, for live animation.
    Realtime,
    /// No waiting. Tests and batch runs.
    Fast,
}

// ---------------------------------------------------------------------------
// Full run orchestration
// ---------------------------------------------------------------------------

/// Run exactly `num_steps` steps with a custom controller, invoking
/// `on_step` after each. Returns the full snapshot sequence.
pub fn simulate_with<F>(
    engine: &Engine,
    num_steps: usize,
    controller: &mut dyn Controller,
    pacing: Pacing,
    mut on_step: F,
) -> Vec<StepSnapshot>
where
    F: FnMut(&StepSnapshot),
{
    let mut state = engine.init_state();
    let mut snapshots = Vec::with_capacity(num_steps);
    let mut arrived = false;

    debug!(
        "run start: controller={}, steps={}, dt={} s",
        controller.name(),
        num_steps,
        engine.constants().dt
    );

    for _ in 0..num_steps {
        let snap = engine.step(&mut state, controller);

        if !arrived && engine.finished(&state) {
            arrived = true;
            info!(
                "end of belt reached at t={:.2} s (step {})",
                snap.time, state.step
            );
        }

        on_step(&snap);
        snapshots.push(snap);

        if pacing == Pacing::Realtime {
            thread::sleep(Duration::from_secs_f64(engine.constants().dt));
        }
    }

    snapshots
}

/// Run with the stock proportional controller and no pacing (convenience
/// wrapper; validates inputs by constructing the engine).
pub fn simulate(
    constants: &BeltConstants,
    params: &ControlParameters,
    num_steps: usize,
) -> Result<Vec<StepSnapshot>, SimError> {
    let engine = Engine::new(constants.clone(), params.clone())?;
    let mut controller = Proportional::new();
    Ok(simulate_with(
        &engine,
        num_steps,
        &mut controller,
        Pacing::Fast,
        |_| {},
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
