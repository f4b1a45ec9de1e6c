//! Fixed-timestep runtime core
//!
//! - [`SimulationClock`] - accumulates wall-clock time into fixed simulation steps
//! - [`FrameScheduler`] - runs all due fixed steps, then one render step, per frame
//! - [`Simulation`] - the world callbacks the scheduler drives
//! - [`TimeSource`] / [`FrameHost`] - the host's clock and frame-timing primitive
//!
//! Everything here is single-threaded: a frame runs synchronously from clock
//! sample to render step, and the clock has exactly one writer (its scheduler).

pub mod clock;
mod error;
pub mod host;
pub mod scheduler;
pub mod time_source;

pub use clock::{ClockConfig, SimulationClock, DEFAULT_FIXED_STEP, DEFAULT_MAX_FRAME_DELTA};
pub use error::{ClockError, SchedulerError, StateError};
pub use host::PacedHost;
pub use scheduler::{FrameHost, FrameReport, FrameScheduler, SchedulerState, Simulation};
pub use time_source::{ManualTime, MonotonicTime, TimeSource};
