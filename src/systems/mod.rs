//! Application systems
//!
//! Modular systems kept out of main.rs so they can be tested without a window.

mod simulation;
mod window;
mod world;

pub use simulation::{FrameStats, Instrumented, SimulationSystem};
pub use window::{WindowError, WindowSystem};
pub use world::{Body, BodyKey, DriftWorld, WorldConfig, WorldError};
