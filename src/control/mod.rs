pub mod proportional;

pub use proportional::Proportional;

use crate::model::{BeltState, ControlParameters};

/// Trait for velocity controllers.
///
/// Implement this to plug a custom control law into the simulation loop.
/// The engine applies actuator saturation to whatever the controller
/// returns, so implementations emit the raw (unclamped) torque demand.
pub trait Controller {
    /// Compute raw torque demand (Nm) from the current state.
    fn control(&mut self, state: &BeltState, params: &ControlParameters, dt: f64) -> f64;

    /// Reset controller internal state (e.g., accumulated terms).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
