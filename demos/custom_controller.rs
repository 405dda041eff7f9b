use belt_sim::control::Controller;
use belt_sim::model::{BeltState, ControlParametersBuilder};
use belt_sim::sim::{self, Engine, Pacing, DEFAULT_NUM_STEPS};
use belt_sim::BeltConstants;

/// A simple bang-bang controller: full torque demand below the setpoint,
/// full reverse demand above it. The engine's saturation turns the
/// (unbounded) demand into +/- tau_max.
struct BangBangController {
    band: f64,
}

impl Controller for BangBangController {
    fn control(&mut self, state: &BeltState, params: &belt_sim::ControlParameters, _dt: f64) -> f64 {
        let error = params.v_ref - state.vel;
        if error > self.band {
            f64::INFINITY
        } else if error < -self.band {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "BangBang"
    }
}

fn main() {
    let constants = BeltConstants::default();
    let params = ControlParametersBuilder::new()
        .mass(15.0)
        .v_ref(0.6)
        .friction(0.25)
        .tau_max(25.0)
        .build()
        .expect("valid parameters");

    let engine = Engine::new(constants.clone(), params).expect("valid engine");
    let mut controller = BangBangController { band: 0.02 };

    println!("Simulating with {} controller...", controller.name());
    let snapshots = sim::simulate_with(
        &engine,
        DEFAULT_NUM_STEPS,
        &mut controller,
        Pacing::Fast,
        |_| {},
    );

    let max_vel = snapshots.iter().map(|s| s.vel).fold(0.0_f64, f64::max);
    let arrival = snapshots.iter().find(|s| s.pos >= constants.length);

    println!("Max velocity: {:.2} m/s", max_vel);
    match arrival {
        Some(s) => println!("Reached the top at t = {:.2} s", s.time),
        None => println!("Did not reach the top in {} steps", snapshots.len()),
    }
    println!("Snapshots: {}", snapshots.len());
}
