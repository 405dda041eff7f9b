use crate::control::Controller;
use crate::error::SimError;
use crate::model::{BeltConstants, BeltState, ControlParameters, StepSnapshot};

// ---------------------------------------------------------------------------
// Fixed-step engine: saturated actuator vs. gravity and friction
// ---------------------------------------------------------------------------

/// The per-run simulation engine. Validates its inputs once at construction
/// and precomputes the two resistive forces, which are constant for a run.
///
/// `step` is pure apart from advancing the state it is handed; pacing and
/// rendering live in the runner and the binaries.
#[derive(Debug, Clone)]
pub struct Engine {
    constants: BeltConstants,
    params: ControlParameters,
    f_gravity: f64,  // m g sin(theta), along the incline
    f_friction: f64, // mu m g cos(theta), opposing up-slope motion
}

impl Engine {
    /// Build an engine, rejecting any out-of-domain constant or parameter
    /// before the run starts.
    pub fn new(constants: BeltConstants, params: ControlParameters) -> Result<Self, SimError> {
        constants.validate()?;
        params.validate()?;
        let f_gravity = params.gravity_force(&constants);
        let f_friction = params.friction_force(&constants);
        Ok(Self {
            constants,
            params,
            f_gravity,
            f_friction,
        })
    }

    pub fn constants(&self) -> &BeltConstants {
        &self.constants
    }

    pub fn params(&self) -> &ControlParameters {
        &self.params
    }

    /// Fresh state at the bottom of the belt, at rest.
    pub fn init_state(&self) -> BeltState {
        BeltState::new()
    }

    /// True once the load has hit the end stop. Further steps hold
    /// `v = 0, s = length` and command no torque.
    pub fn finished(&self, state: &BeltState) -> bool {
        state.pos >= self.constants.length
    }

    /// Advance one timestep and emit the observable snapshot.
    ///
    /// Order matters: torque demand from the pre-step velocity, hard
    /// saturation at the actuator limit, Euler velocity update with the
    /// non-negativity clamp, Euler position update, then the end-stop clamp.
    /// Clamping after integration is what freezes the load at the top
    /// instead of letting it overshoot.
    pub fn step(&self, state: &mut BeltState, controller: &mut dyn Controller) -> StepSnapshot {
        let c = &self.constants;
        let p = &self.params;

        if self.finished(state) {
            // Halted at the end stop: motor off, nothing moves.
            state.pos = c.length;
            state.vel = 0.0;
            state.step += 1;
            return self.snapshot(state, 0.0);
        }

        let raw = controller.control(state, p, c.dt);
        let torque = raw.clamp(-p.tau_max, p.tau_max);

        let f_motor = torque * c.efficiency / c.drum_radius;
        let accel = (f_motor - self.f_gravity - self.f_friction) / p.mass;

        state.vel = (state.vel + accel * c.dt).max(0.0);
        state.pos += state.vel * c.dt;
        state.step += 1;

        if state.pos >= c.length {
            state.pos = c.length;
            state.vel = 0.0;
        }

        self.snapshot(state, torque)
    }

    fn snapshot(&self, state: &BeltState, torque: f64) -> StepSnapshot {
        let c = &self.constants;
        let omega = state.vel / c.drum_radius;
        StepSnapshot {
            time: state.time(c.dt),
            vel: state.vel,
            torque,
            power: torque * omega,
            pos: state.pos,
            world: c.world_pos(state.pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Proportional;

    fn default_engine() -> Engine {
        Engine::new(BeltConstants::default(), ControlParameters::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_params() {
        let bad = ControlParameters {
            tau_max: 0.0,
            ..Default::default()
        };
        assert!(Engine::new(BeltConstants::default(), bad).is_err());
    }

    #[test]
    fn first_step_matches_hand_calculation() {
        // From rest: error 0.6, demand 72 Nm, saturated to 25 Nm.
        // Fm = 25*0.9/0.15 = 150 N against ~46.2 + ~34.9 N of resistance.
        let engine = default_engine();
        let mut state = engine.init_state();
        let mut ctl = Proportional::new();

        let snap = engine.step(&mut state, &mut ctl);

        assert!((snap.torque - 25.0).abs() < 1e-12);
        assert!((snap.vel - 0.229).abs() < 0.005);
        assert!((snap.pos - 0.0114).abs() < 0.0005);
        assert!((snap.power - snap.torque * snap.vel / 0.15).abs() < 1e-9);
        assert_eq!(state.step, 1);
    }

    #[test]
    fn snapshot_world_coords_track_position() {
        let engine = default_engine();
        let mut state = engine.init_state();
        let mut ctl = Proportional::new();
        let snap = engine.step(&mut state, &mut ctl);
        let theta = engine.constants().theta;
        assert!((snap.world.x - snap.pos * theta.cos()).abs() < 1e-12);
        assert!((snap.world.y - snap.pos * theta.sin()).abs() < 1e-12);
    }

    #[test]
    fn torque_saturates_both_ways() {
        let engine = default_engine();
        let mut ctl = Proportional::new();

        // Large positive error saturates high.
        let mut state = engine.init_state();
        let snap = engine.step(&mut state, &mut ctl);
        assert_eq!(snap.torque, 25.0);

        // Large overspeed saturates low.
        let mut state = BeltState {
            step: 0,
            vel: 10.0,
            pos: 0.5,
        };
        let snap = engine.step(&mut state, &mut ctl);
        assert_eq!(snap.torque, -25.0);
    }

    #[test]
    fn velocity_never_negative() {
        // A drive too weak to overcome gravity: the Euler step would push
        // velocity below zero, the clamp catches it at exactly zero.
        let weak = ControlParameters {
            tau_max: 5.0,
            ..Default::default()
        };
        let engine = Engine::new(BeltConstants::default(), weak).unwrap();
        let mut ctl = Proportional::new();
        let mut state = BeltState {
            step: 0,
            vel: 0.3,
            pos: 0.5,
        };
        for _ in 0..50 {
            let snap = engine.step(&mut state, &mut ctl);
            assert!(snap.vel >= 0.0);
        }
        assert_eq!(state.vel, 0.0);
    }

    #[test]
    fn end_stop_freezes_the_load() {
        let engine = default_engine();
        let mut ctl = Proportional::new();
        let mut state = BeltState {
            step: 0,
            vel: 0.5,
            pos: engine.constants().length - 1e-6,
        };

        let snap = engine.step(&mut state, &mut ctl);
        assert_eq!(snap.pos, engine.constants().length);
        assert_eq!(snap.vel, 0.0);

        // Halted: later steps hold position and report the motor off.
        let snap = engine.step(&mut state, &mut ctl);
        assert_eq!(snap.pos, engine.constants().length);
        assert_eq!(snap.vel, 0.0);
        assert_eq!(snap.torque, 0.0);
        assert_eq!(snap.power, 0.0);
    }
}
