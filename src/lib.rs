pub mod model;
pub mod control;
pub mod sim;
pub mod io;
pub mod error;

pub use error::SimError;

// Convenience re-exports for the common path: build parameters, run, render.
pub use control::{Controller, Proportional};
pub use model::{BeltConstants, BeltState, ControlParameters, StepSnapshot};
pub use sim::{simulate, simulate_with, Engine, Pacing, DEFAULT_NUM_STEPS};
