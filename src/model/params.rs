use std::ops::RangeInclusive;

use crate::error::SimError;
use crate::model::constants::BeltConstants;

// ---------------------------------------------------------------------------
// User-facing control parameters
// ---------------------------------------------------------------------------

/// Slider ranges exposed by the parameter UI. Out-of-range inputs are the
/// configuration layer's problem; the engine only enforces the hard domains
/// (positivity etc.) in [`ControlParameters::validate`].
pub const MASS_RANGE: RangeInclusive<f64> = 1.0..=50.0;
pub const V_REF_RANGE: RangeInclusive<f64> = 0.1..=2.0;
pub const FRICTION_RANGE: RangeInclusive<f64> = 0.0..=0.8;
pub const KP_RANGE: RangeInclusive<f64> = 10.0..=300.0;
pub const TAU_MAX_RANGE: RangeInclusive<f64> = 5.0..=50.0;

/// One run's worth of control configuration. Immutable once a run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlParameters {
    pub mass: f64,     // kg
    pub v_ref: f64,    // m/s, velocity setpoint
    pub friction: f64, // kinetic friction coefficient
    pub kp: f64,       // proportional gain, Nm per (m/s)
    pub tau_max: f64,  // Nm, actuator saturation limit
}

impl Default for ControlParameters {
    fn default() -> Self {
        Self {
            mass: 15.0,
            v_ref: 0.6,
            friction: 0.25,
            kp: 120.0,
            tau_max: 25.0,
        }
    }
}

impl ControlParameters {
    /// Check every field against its documented domain.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.mass > 0.0) {
            return Err(SimError::invalid("mass", self.mass, "must be > 0"));
        }
        if !(self.v_ref >= 0.0) {
            return Err(SimError::invalid("v_ref", self.v_ref, "must be >= 0"));
        }
        if !(self.friction >= 0.0) {
            return Err(SimError::invalid("friction", self.friction, "must be >= 0"));
        }
        if !(self.kp > 0.0) {
            return Err(SimError::invalid("kp", self.kp, "must be > 0"));
        }
        if !(self.tau_max > 0.0) {
            return Err(SimError::invalid("tau_max", self.tau_max, "must be > 0"));
        }
        Ok(())
    }

    /// Clamp every field into its UI range. For programmatic callers that
    /// bypass the sliders.
    pub fn clamped(self) -> Self {
        Self {
            mass: self.mass.clamp(*MASS_RANGE.start(), *MASS_RANGE.end()),
            v_ref: self.v_ref.clamp(*V_REF_RANGE.start(), *V_REF_RANGE.end()),
            friction: self
                .friction
                .clamp(*FRICTION_RANGE.start(), *FRICTION_RANGE.end()),
            kp: self.kp.clamp(*KP_RANGE.start(), *KP_RANGE.end()),
            tau_max: self
                .tau_max
                .clamp(*TAU_MAX_RANGE.start(), *TAU_MAX_RANGE.end()),
        }
    }

    /// Gravity component along the incline, N. Constant over a run.
    pub fn gravity_force(&self, constants: &BeltConstants) -> f64 {
        self.mass * constants.gravity * constants.theta.sin()
    }

    /// Kinetic friction force opposing up-slope motion, N. Constant over a
    /// run; the model never reverses it (motion is up-slope only).
    pub fn friction_force(&self, constants: &BeltConstants) -> f64 {
        self.friction * self.mass * constants.gravity * constants.theta.cos()
    }

    /// Largest force the drive can put on the load at the saturation limit.
    pub fn max_motor_force(&self, constants: &BeltConstants) -> f64 {
        self.tau_max * constants.efficiency / constants.drum_radius
    }

    /// True when the saturated drive cannot overcome gravity plus friction.
    pub fn stalls(&self, constants: &BeltConstants) -> bool {
        self.max_motor_force(constants) < self.gravity_force(constants) + self.friction_force(constants)
    }
}

// ---------------------------------------------------------------------------
// Parameter builder
// ---------------------------------------------------------------------------

pub struct ControlParametersBuilder {
    params: ControlParameters,
}

impl ControlParametersBuilder {
    pub fn new() -> Self {
        Self {
            params: ControlParameters::default(),
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.params.mass = v; self }
    pub fn v_ref(mut self, v: f64) -> Self { self.params.v_ref = v; self }
    pub fn friction(mut self, v: f64) -> Self { self.params.friction = v; self }
    pub fn kp(mut self, v: f64) -> Self { self.params.kp = v; self }
    pub fn tau_max(mut self, v: f64) -> Self { self.params.tau_max = v; self }

    pub fn build(self) -> Result<ControlParameters, SimError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

impl Default for ControlParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ControlParameters::default().validate().is_ok());
    }

    #[test]
    fn negative_mass_rejected() {
        let p = ControlParameters {
            mass: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(SimError::InvalidParameter { name: "mass", .. })
        ));
    }

    #[test]
    fn nan_mass_rejected() {
        let p = ControlParameters {
            mass: f64::NAN,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn clamped_pulls_into_ui_range() {
        let p = ControlParameters {
            mass: 500.0,
            v_ref: 0.0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(p.mass, 50.0);
        assert_eq!(p.v_ref, 0.1);
    }

    #[test]
    fn builder_rejects_bad_gain() {
        let result = ControlParametersBuilder::new().kp(0.0).build();
        assert!(result.is_err());
    }

    #[test]
    fn reference_forces() {
        // m=15, mu=0.25 on the default rig.
        let c = BeltConstants::default();
        let p = ControlParameters::default();
        assert!((p.gravity_force(&c) - 46.2).abs() < 0.1);
        assert!((p.friction_force(&c) - 34.9).abs() < 0.1);
        assert!((p.max_motor_force(&c) - 150.0).abs() < 1e-9);
        assert!(!p.stalls(&c));
    }

    #[test]
    fn weak_drive_stalls() {
        let c = BeltConstants::default();
        let p = ControlParameters {
            tau_max: 5.0,
            ..Default::default()
        };
        // 5 * 0.9 / 0.15 = 30 N, well short of ~81 N of resistance.
        assert!(p.stalls(&c));
    }
}
