use nalgebra::Vector2;

use crate::error::SimError;

// ---------------------------------------------------------------------------
// Fixed plant constants: belt geometry and drivetrain
// ---------------------------------------------------------------------------

/// Physical constants of the conveyor rig. Fixed for a run; not exposed to
/// the parameter UI.
///
/// The incline angle is derived from the geometry and cached at construction
/// so `sin`/`cos` are not recomputed every step.
#[derive(Debug, Clone)]
pub struct BeltConstants {
    pub gravity: f64,      // m/s^2
    pub length: f64,       // m, travel distance along the belt
    pub rise: f64,         // m, vertical rise between drums
    pub run: f64,          // m, horizontal distance between drums
    pub theta: f64,        // rad, incline angle
    pub drum_radius: f64,  // m
    pub efficiency: f64,   // dimensionless, (0, 1]
    pub dt: f64,           // s, integration timestep
}

impl Default for BeltConstants {
    fn default() -> Self {
        // Reference rig: 3 m belt climbing 1 m over 2.83 m of floor.
        Self {
            gravity: 9.81,
            length: 3.0,
            rise: 1.0,
            run: 2.83,
            theta: 18.3_f64.to_radians(),
            drum_radius: 0.15,
            efficiency: 0.9,
            dt: 0.05, // 20 Hz
        }
    }
}

impl BeltConstants {
    /// Check every field against its documented domain.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.gravity > 0.0) {
            return Err(SimError::invalid("gravity", self.gravity, "must be > 0"));
        }
        if !(self.length > 0.0) {
            return Err(SimError::invalid("length", self.length, "must be > 0"));
        }
        if !(self.rise > 0.0) {
            return Err(SimError::invalid("rise", self.rise, "must be > 0"));
        }
        if !(self.run > 0.0) {
            return Err(SimError::invalid("run", self.run, "must be > 0"));
        }
        if !(self.drum_radius > 0.0) {
            return Err(SimError::invalid(
                "drum_radius",
                self.drum_radius,
                "must be > 0",
            ));
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(SimError::invalid(
                "efficiency",
                self.efficiency,
                "must be in (0, 1]",
            ));
        }
        if !(self.dt > 0.0) {
            return Err(SimError::invalid("dt", self.dt, "must be > 0"));
        }
        Ok(())
    }

    /// Unit vector pointing up the slope, world frame.
    pub fn incline_dir(&self) -> Vector2<f64> {
        Vector2::new(self.theta.cos(), self.theta.sin())
    }

    /// World-frame position of a point `s` meters along the belt.
    pub fn world_pos(&self, s: f64) -> Vector2<f64> {
        self.incline_dir() * s
    }
}
