//! Clock and scheduler error types

use std::fmt;

/// Rejected clock configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockError {
    /// Fixed step size was zero, negative, or not finite
    InvalidStepSize(f64),
    /// Frame delta clamp was zero, negative, or not finite
    InvalidMaxDelta(f64),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::InvalidStepSize(step) => {
                write!(
                    f,
                    "Invalid fixed step size: {} (must be a positive, finite number of seconds)",
                    step
                )
            }
            ClockError::InvalidMaxDelta(delta) => {
                write!(
                    f,
                    "Invalid max frame delta: {} (must be a positive, finite number of seconds)",
                    delta
                )
            }
        }
    }
}

impl std::error::Error for ClockError {}

/// Scheduler used in the wrong lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// `frame()` was called before `start()`
    NotStarted,
    /// `start()` was called on a running scheduler
    AlreadyRunning,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NotStarted => write!(f, "Frame scheduler has not been started"),
            StateError::AlreadyRunning => write!(f, "Frame scheduler is already running"),
        }
    }
}

impl std::error::Error for StateError {}

/// Error returned by the frame scheduler
///
/// `E` is the error type of the driven [`Simulation`](crate::Simulation).
#[derive(Debug, PartialEq)]
pub enum SchedulerError<E> {
    /// Lifecycle misuse
    State(StateError),
    /// A fixed step or render step failed; the rest of that frame was abandoned
    Callback(E),
}

impl<E> From<StateError> for SchedulerError<E> {
    fn from(err: StateError) -> Self {
        SchedulerError::State(err)
    }
}

impl<E: fmt::Display> fmt::Display for SchedulerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::State(err) => write!(f, "{}", err),
            SchedulerError::Callback(err) => write!(f, "Frame callback failed: {}", err),
        }
    }
}

impl<E> std::error::Error for SchedulerError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchedulerError::State(err) => Some(err),
            SchedulerError::Callback(err) => Some(err),
        }
    }
}
