//! Fixed-timestep simulation clock
//!
//! Accumulates clamped wall-clock deltas and converts them into a whole number
//! of fixed simulation steps, leaving the remainder as an interpolation
//! fraction for rendering.

use serde::{Deserialize, Serialize};

use crate::error::ClockError;

/// Default simulation step: 50 steps per second
pub const DEFAULT_FIXED_STEP: f64 = 1.0 / 50.0;

/// Largest wall-clock delta a single frame may contribute, in seconds
pub const DEFAULT_MAX_FRAME_DELTA: f64 = 0.25;

/// Clock parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Seconds of simulated time per fixed step
    pub fixed_step: f64,
    /// Frame deltas above this are clamped to it
    pub max_frame_delta: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

impl ClockConfig {
    /// Check that both durations are positive and finite
    pub fn validate(&self) -> Result<(), ClockError> {
        if !(self.fixed_step.is_finite() && self.fixed_step > 0.0) {
            return Err(ClockError::InvalidStepSize(self.fixed_step));
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0) {
            return Err(ClockError::InvalidMaxDelta(self.max_frame_delta));
        }
        Ok(())
    }
}

/// Fixed-timestep accumulator clock
///
/// Call [`advance`](Self::advance) once per frame with the current wall time,
/// then drain the emitted steps with [`consume_step`](Self::consume_step).
/// After every `advance`:
///
/// - `0 <= accumulator() < fixed_step()`
/// - `0 <= alpha() < 1`
///
/// The number of steps emitted depends only on the sequence of samples, never
/// on how often frames arrive, so a replayed sample sequence reproduces the
/// same steps.
///
/// The clock is the only writer of its state. Other systems read it through
/// shared references.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    config: ClockConfig,
    last_sample: Option<f64>,
    accumulator: f64,
    elapsed_sim_time: f64,
    elapsed_wall_time: f64,
    alpha: f64,
    pending_steps: u32,
    step_count: u64,
    frame_count: u64,
}

impl SimulationClock {
    /// Create a clock with the given step size and the default delta clamp
    pub fn new(fixed_step: f64) -> Result<Self, ClockError> {
        Self::with_config(ClockConfig {
            fixed_step,
            ..ClockConfig::default()
        })
    }

    /// Create a clock from a full configuration
    pub fn with_config(config: ClockConfig) -> Result<Self, ClockError> {
        config.validate()?;
        Ok(Self {
            config,
            last_sample: None,
            accumulator: 0.0,
            elapsed_sim_time: 0.0,
            elapsed_wall_time: 0.0,
            alpha: 0.0,
            pending_steps: 0,
            step_count: 0,
            frame_count: 0,
        })
    }

    /// Replace the frame delta clamp
    pub fn with_max_frame_delta(mut self, max_frame_delta: f64) -> Result<Self, ClockError> {
        let config = ClockConfig {
            max_frame_delta,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Re-establish the wall-clock baseline without accruing any time
    ///
    /// Used when the loop starts and when it resumes after a pause.
    pub fn reset_baseline(&mut self, now: f64) {
        self.last_sample = Some(now);
    }

    /// Sample the wall clock and emit the steps that are now due
    ///
    /// Returns the number of steps emitted by this call. The first call only
    /// establishes the baseline and emits nothing. Steps left undrained from
    /// the previous frame are discarded.
    pub fn advance(&mut self, now: f64) -> u32 {
        self.frame_count += 1;
        self.discard_pending();

        let Some(last) = self.last_sample else {
            self.last_sample = Some(now);
            self.alpha = self.accumulator / self.config.fixed_step;
            return 0;
        };

        let raw_delta = now - last;
        let delta = raw_delta.clamp(0.0, self.config.max_frame_delta);
        if delta != raw_delta {
            log::debug!("Frame delta {:.4}s clamped to {:.4}s", raw_delta, delta);
        }
        self.last_sample = Some(now);
        self.elapsed_wall_time += delta;
        self.accumulator += delta;

        let step = self.config.fixed_step;
        let mut steps = 0;
        while self.accumulator >= step {
            steps += 1;
            self.accumulator -= step;
            self.elapsed_sim_time += step;
        }

        self.pending_steps = steps;
        self.step_count += u64::from(steps);
        self.alpha = self.accumulator / step;
        steps
    }

    /// Take one emitted step, returning `false` once none remain
    pub fn consume_step(&mut self) -> bool {
        if self.pending_steps == 0 {
            return false;
        }
        self.pending_steps -= 1;
        true
    }

    /// Drop steps left undrained by an abandoned frame, returning how many
    pub fn discard_pending(&mut self) -> u32 {
        let dropped = self.pending_steps;
        if dropped > 0 {
            log::warn!(
                "Discarding {} undrained simulation steps from the previous frame",
                dropped
            );
            self.pending_steps = 0;
        }
        dropped
    }

    /// Steps emitted by the last `advance` and not yet consumed
    pub fn pending_steps(&self) -> u32 {
        self.pending_steps
    }

    /// Fraction of the next step already elapsed, in `[0, 1)`
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Unconsumed simulated time in seconds
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn fixed_step(&self) -> f64 {
        self.config.fixed_step
    }

    pub fn max_frame_delta(&self) -> f64 {
        self.config.max_frame_delta
    }

    pub fn config(&self) -> ClockConfig {
        self.config
    }

    /// Upper bound on steps a single `advance` can emit
    pub fn max_steps_per_frame(&self) -> u32 {
        (self.config.max_frame_delta / self.config.fixed_step).floor() as u32
    }

    /// Simulated time covered by all emitted steps
    pub fn elapsed_sim_time(&self) -> f64 {
        self.elapsed_sim_time
    }

    /// Sum of clamped frame deltas
    pub fn elapsed_wall_time(&self) -> f64 {
        self.elapsed_wall_time
    }

    /// Total steps emitted since construction
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Total `advance` calls since construction
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
