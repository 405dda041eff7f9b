pub mod engine;
pub mod runner;
pub mod event;

pub use engine::Engine;
pub use runner::{simulate, simulate_with, Pacing, DEFAULT_NUM_STEPS};
