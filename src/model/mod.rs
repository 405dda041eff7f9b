pub mod constants;
pub mod params;
pub mod state;

pub use constants::BeltConstants;
pub use params::{ControlParameters, ControlParametersBuilder};
pub use state::{BeltState, StepSnapshot};
