//! fixedloop - fixed-timestep simulation runtime
//!
//! Library side of the `fixedloop` binary: configuration, logging setup, input
//! mapping, and the systems that connect the frame scheduler to a demo world.

pub mod config;
pub mod input;
pub mod logging;
pub mod systems;
