use crate::model::{BeltState, ControlParameters};

use super::Controller;

// ---------------------------------------------------------------------------
// Proportional velocity controller
// ---------------------------------------------------------------------------

/// Pure proportional law: torque demand = kp * (v_ref - v).
///
/// Stateless by construction. There is no integral term and therefore no
/// anti-windup; saturation happens downstream in the engine, which models
/// it as an actuator limit rather than part of the control law.
#[derive(Debug, Clone, Default)]
pub struct Proportional;

impl Proportional {
    pub fn new() -> Self {
        Self
    }
}

impl Controller for Proportional {
    fn control(&mut self, state: &BeltState, params: &ControlParameters, _dt: f64) -> f64 {
        params.kp * (params.v_ref - state.vel)
    }

    fn name(&self) -> &str {
        "Proportional"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_gain_times_error() {
        let mut ctl = Proportional::new();
        let params = ControlParameters::default();
        let state = BeltState::new();
        // At rest the full setpoint is the error: 120 * 0.6 = 72 Nm demand.
        let tau = ctl.control(&state, &params, 0.05);
        assert!((tau - 72.0).abs() < 1e-10);
    }

    #[test]
    fn zero_error_zero_demand() {
        let mut ctl = Proportional::new();
        let params = ControlParameters::default();
        let state = BeltState {
            step: 10,
            vel: params.v_ref,
            pos: 1.0,
        };
        assert_eq!(ctl.control(&state, &params, 0.05), 0.0);
    }

    #[test]
    fn overspeed_demands_negative_torque() {
        let mut ctl = Proportional::new();
        let params = ControlParameters::default();
        let state = BeltState {
            step: 10,
            vel: 1.0,
            pos: 1.0,
        };
        assert!(ctl.control(&state, &params, 0.05) < 0.0);
    }
}
