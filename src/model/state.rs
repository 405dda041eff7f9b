use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Evolving simulation state
// ---------------------------------------------------------------------------

/// The load's state along the belt. One instance per run, owned by whoever
/// drives the engine; mutated once per step.
#[derive(Debug, Clone, PartialEq)]
pub struct BeltState {
    pub step: usize,
    pub vel: f64, // m/s, never negative
    pub pos: f64, // m along the belt, in [0, length]
}

impl BeltState {
    pub fn new() -> Self {
        Self {
            step: 0,
            vel: 0.0,
            pos: 0.0,
        }
    }

    /// Elapsed simulated time for a given timestep.
    pub fn time(&self, dt: f64) -> f64 {
        self.step as f64 * dt
    }
}

impl Default for BeltState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Per-step observable snapshot
// ---------------------------------------------------------------------------

/// Everything a display or rendering layer needs for one frame. Immutable;
/// emitted once per step and not retained by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSnapshot {
    pub time: f64,            // s
    pub vel: f64,             // m/s
    pub torque: f64,          // Nm, post-saturation
    pub power: f64,           // W, torque * omega
    pub pos: f64,             // m along the belt
    pub world: Vector2<f64>,  // block position, world frame
}

impl StepSnapshot {
    /// Readout line with the reference display precisions.
    pub fn readout(&self) -> String {
        format!(
            "v = {:.2} m/s | tau = {:.1} Nm | P = {:.1} W | s = {:.2} m",
            self.vel, self.torque, self.power, self.pos
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_at_rest_at_origin() {
        let s = BeltState::new();
        assert_eq!(s.step, 0);
        assert_eq!(s.vel, 0.0);
        assert_eq!(s.pos, 0.0);
    }

    #[test]
    fn time_scales_with_step() {
        let s = BeltState {
            step: 40,
            vel: 0.0,
            pos: 0.0,
        };
        assert!((s.time(0.05) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn readout_uses_reference_precision() {
        let snap = StepSnapshot {
            time: 0.05,
            vel: 0.229,
            torque: 25.0,
            power: 38.166,
            pos: 0.0114,
            world: Vector2::zeros(),
        };
        let line = snap.readout();
        assert!(line.contains("0.23 m/s"));
        assert!(line.contains("25.0 Nm"));
        assert!(line.contains("38.2 W"));
        assert!(line.contains("0.01 m"));
    }
}
