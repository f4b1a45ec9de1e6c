//! Frame scheduler
//!
//! Drives a [`Simulation`] from a per-frame callback: every frame runs all due
//! fixed steps in order, then exactly one render step with the interpolation
//! fraction left over.

use crate::clock::SimulationClock;
use crate::error::{SchedulerError, StateError};
use crate::time_source::{MonotonicTime, TimeSource};

/// World driven by the scheduler
pub trait Simulation {
    type Error;

    /// Advance the world by exactly `dt` seconds
    ///
    /// May be called several times in a row within one frame.
    fn fixed_step(&mut self, dt: f64) -> Result<(), Self::Error>;

    /// Present the world, interpolating `alpha` (in `[0, 1)`) of the way from
    /// the previous simulation state to the current one
    fn render_step(&mut self, alpha: f64) -> Result<(), Self::Error>;
}

/// Host frame-timing primitive
///
/// `next_frame` blocks until the next display refresh is due and returns
/// `false` when the loop should end.
pub trait FrameHost {
    fn next_frame(&mut self) -> bool;
}

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not started yet
    Idle,
    /// Dispatching frames
    Running,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Fixed steps run this frame
    pub steps: u32,
    /// Interpolation fraction passed to the render step
    pub alpha: f64,
    /// Whether the frame ran while paused
    pub paused: bool,
}

/// Fixed-step frame scheduler
///
/// Owns the [`SimulationClock`] exclusively and is the only code that advances
/// it.
#[derive(Debug)]
pub struct FrameScheduler<T: TimeSource = MonotonicTime> {
    clock: SimulationClock,
    time: T,
    state: SchedulerState,
    paused: bool,
}

impl FrameScheduler<MonotonicTime> {
    /// Create a scheduler sampling real monotonic time
    pub fn new(clock: SimulationClock) -> Self {
        Self::with_time_source(clock, MonotonicTime::new())
    }
}

impl<T: TimeSource> FrameScheduler<T> {
    /// Create a scheduler sampling the given time source
    pub fn with_time_source(clock: SimulationClock, time: T) -> Self {
        Self {
            clock,
            time,
            state: SchedulerState::Idle,
            paused: false,
        }
    }

    /// Start in the paused state
    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Transition Idle → Running, sampling the clock baseline
    pub fn start(&mut self) -> Result<(), StateError> {
        if self.state == SchedulerState::Running {
            return Err(StateError::AlreadyRunning);
        }
        let now = self.time.now();
        self.clock.reset_baseline(now);
        self.state = SchedulerState::Running;
        log::info!(
            "Frame scheduler started: fixed step {:.4}s, at most {} steps per frame",
            self.clock.fixed_step(),
            self.clock.max_steps_per_frame()
        );
        Ok(())
    }

    /// Run one frame: all due fixed steps, then one render step
    ///
    /// An error from either callback aborts the rest of the frame and is
    /// returned as is. Steps already applied are not rolled back and the
    /// failed step is not retried.
    pub fn frame<S: Simulation>(
        &mut self,
        sim: &mut S,
    ) -> Result<FrameReport, SchedulerError<S::Error>> {
        if self.state != SchedulerState::Running {
            return Err(StateError::NotStarted.into());
        }

        // leftovers from a frame abandoned by a callback error
        self.clock.discard_pending();
        if !self.paused {
            self.clock.advance(self.time.now());
        }

        let dt = self.clock.fixed_step();
        let mut steps = 0;
        while self.clock.consume_step() {
            sim.fixed_step(dt).map_err(SchedulerError::Callback)?;
            steps += 1;
        }

        let alpha = self.clock.alpha();
        sim.render_step(alpha).map_err(SchedulerError::Callback)?;

        log::trace!("frame: {} steps, alpha {:.3}", steps, alpha);
        Ok(FrameReport {
            steps,
            alpha,
            paused: self.paused,
        })
    }

    /// Dispatch frames until the host stops producing them
    ///
    /// Starts the scheduler if it is still idle. Returns the number of frames
    /// run.
    pub fn run<H, S>(
        &mut self,
        host: &mut H,
        sim: &mut S,
    ) -> Result<u64, SchedulerError<S::Error>>
    where
        H: FrameHost,
        S: Simulation,
    {
        if self.state == SchedulerState::Idle {
            self.start()?;
        }

        let mut frames = 0;
        while host.next_frame() {
            self.frame(sim)?;
            frames += 1;
        }
        Ok(frames)
    }

    /// Pause or resume fixed stepping
    ///
    /// While paused, frames still render but the clock does not advance. On
    /// resume the baseline is re-sampled so the paused interval is not
    /// simulated.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            log::info!("Simulation paused");
        } else {
            self.clock.reset_baseline(self.time.now());
            log::info!("Simulation resumed");
        }
    }

    /// Flip the pause state, returning the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Read-only view of the clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn time_source(&self) -> &T {
        &self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_source::ManualTime;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Fixed(f64),
        Render(f64),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        fail_on_fixed: Option<usize>,
        fixed_seen: usize,
    }

    impl Simulation for Recorder {
        type Error = String;

        fn fixed_step(&mut self, dt: f64) -> Result<(), String> {
            self.fixed_seen += 1;
            if self.fail_on_fixed == Some(self.fixed_seen) {
                return Err(format!("step {} failed", self.fixed_seen));
            }
            self.calls.push(Call::Fixed(dt));
            Ok(())
        }

        fn render_step(&mut self, alpha: f64) -> Result<(), String> {
            self.calls.push(Call::Render(alpha));
            Ok(())
        }
    }

    fn scheduler(step: f64) -> (FrameScheduler<ManualTime>, ManualTime) {
        let time = ManualTime::new(0.0);
        let clock = SimulationClock::new(step).unwrap();
        (FrameScheduler::with_time_source(clock, time.clone()), time)
    }

    #[test]
    fn test_frame_before_start_fails() {
        let (mut sched, _time) = scheduler(0.02);
        let mut sim = Recorder::default();
        assert_eq!(
            sched.frame(&mut sim),
            Err(SchedulerError::State(StateError::NotStarted))
        );
        assert!(sim.calls.is_empty());
    }

    #[test]
    fn test_start_twice_fails() {
        let (mut sched, _time) = scheduler(0.02);
        assert_eq!(sched.state(), SchedulerState::Idle);
        sched.start().unwrap();
        assert_eq!(sched.state(), SchedulerState::Running);
        assert_eq!(sched.start(), Err(StateError::AlreadyRunning));
    }

    #[test]
    fn test_fixed_steps_then_one_render() {
        let (mut sched, time) = scheduler(0.25);
        let mut sim = Recorder::default();
        sched.start().unwrap();

        time.advance(0.25 * 0.5);
        let report = sched.frame(&mut sim).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(sim.calls, vec![Call::Render(0.5)]);

        sim.calls.clear();
        time.advance(0.25 * 0.5);
        let report = sched.frame(&mut sim).unwrap();
        assert_eq!(report.steps, 1);
        assert_eq!(sim.calls, vec![Call::Fixed(0.25), Call::Render(0.0)]);
    }

    #[test]
    fn test_catch_up_runs_steps_in_order_before_render() {
        let (mut sched, time) = scheduler(0.02);
        let mut sim = Recorder::default();
        sched.start().unwrap();

        time.advance(0.105);
        let report = sched.frame(&mut sim).unwrap();
        assert_eq!(report.steps, 5);
        assert_eq!(sim.calls.len(), 6);
        assert!(sim.calls[..5].iter().all(|c| *c == Call::Fixed(0.02)));
        assert!(matches!(sim.calls[5], Call::Render(_)));
    }

    #[test]
    fn test_callback_error_aborts_frame() {
        let (mut sched, time) = scheduler(0.02);
        let mut sim = Recorder {
            fail_on_fixed: Some(3),
            ..Default::default()
        };
        sched.start().unwrap();

        time.advance(0.105);
        let err = sched.frame(&mut sim).unwrap_err();
        assert_eq!(err, SchedulerError::Callback("step 3 failed".to_string()));
        // two steps applied, no render, nothing retried
        assert_eq!(sim.calls, vec![Call::Fixed(0.02), Call::Fixed(0.02)]);

        // the next frame carries on without replaying the failed step
        time.advance(0.01);
        let report = sched.frame(&mut sim).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(sim.fixed_seen, 3);
    }

    #[test]
    fn test_pause_renders_without_stepping() {
        let (mut sched, time) = scheduler(0.02);
        let mut sim = Recorder::default();
        sched.start().unwrap();

        time.advance(0.03);
        sched.frame(&mut sim).unwrap();
        let alpha_before = sched.clock().alpha();

        sched.set_paused(true);
        sim.calls.clear();
        time.advance(5.0);
        let report = sched.frame(&mut sim).unwrap();
        assert!(report.paused);
        assert_eq!(report.steps, 0);
        assert_eq!(sim.calls, vec![Call::Render(alpha_before)]);

        // the paused interval is not simulated after resuming
        assert!(!sched.toggle_pause());
        time.advance(0.015);
        let report = sched.frame(&mut sim).unwrap();
        assert_eq!(report.steps, 1);
        assert!(!report.paused);
    }

    #[test]
    fn test_paused_frame_after_error_runs_no_steps() {
        let (mut sched, time) = scheduler(0.02);
        let mut sim = Recorder {
            fail_on_fixed: Some(1),
            ..Default::default()
        };
        sched.start().unwrap();

        time.advance(0.105);
        assert!(sched.frame(&mut sim).is_err());
        assert_eq!(sim.fixed_seen, 1);

        sched.set_paused(true);
        time.advance(0.05);
        let report = sched.frame(&mut sim).unwrap();
        assert!(report.paused);
        assert_eq!(report.steps, 0);
        assert_eq!(sim.fixed_seen, 1);
        assert_eq!(sched.clock().pending_steps(), 0);
        assert!(matches!(sim.calls.as_slice(), [Call::Render(_)]));

        // resuming does not replay the abandoned steps either
        sched.set_paused(false);
        time.advance(0.01);
        let report = sched.frame(&mut sim).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(sim.fixed_seen, 1);
    }

    struct CountdownHost {
        time: ManualTime,
        delta: f64,
        remaining: u32,
    }

    impl FrameHost for CountdownHost {
        fn next_frame(&mut self) -> bool {
            if self.remaining == 0 {
                return false;
            }
            self.remaining -= 1;
            self.time.advance(self.delta);
            true
        }
    }

    #[test]
    fn test_run_starts_and_dispatches_until_host_stops() {
        let (mut sched, time) = scheduler(0.02);
        let mut sim = Recorder::default();
        let mut host = CountdownHost {
            time,
            delta: 0.04,
            remaining: 10,
        };

        let frames = sched.run(&mut host, &mut sim).unwrap();
        assert_eq!(frames, 10);
        assert_eq!(sched.state(), SchedulerState::Running);

        let renders = sim.calls.iter().filter(|c| matches!(c, Call::Render(_))).count();
        assert_eq!(renders, 10);
        assert_eq!(sched.clock().step_count() as usize, sim.calls.len() - renders);
    }
}
