//! Simulation system
//!
//! Glue between the frame host and the demo world:
//! - owns the frame scheduler and the world
//! - applies input actions (pause, reset)
//! - reports frame statistics through the log

use fixedloop_core::{
    ClockError, FrameHost, FrameReport, FrameScheduler, MonotonicTime, SchedulerError, Simulation,
    StateError, TimeSource,
};

use crate::config::AppConfig;
use crate::input::InputAction;
use crate::systems::world::{DriftWorld, WorldError};

/// Running frame and step counts
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Frames between log reports (0 disables reporting)
    pub report_interval: u64,
    /// Render steps seen
    pub frames: u64,
    /// Fixed steps seen
    pub steps: u64,
    steps_at_report: u64,
}

impl FrameStats {
    pub fn new(report_interval: u64) -> Self {
        Self {
            report_interval,
            ..Default::default()
        }
    }

    /// Average fixed steps per frame since the last report
    fn steps_per_frame_since_report(&self) -> f64 {
        let frames = self.report_interval.max(1) as f64;
        (self.steps - self.steps_at_report) as f64 / frames
    }
}

/// Simulation wrapper counting the calls that pass through it
pub struct Instrumented<S> {
    inner: S,
    stats: FrameStats,
}

impl<S> Instrumented<S> {
    pub fn new(inner: S, report_interval: u64) -> Self {
        Self {
            inner,
            stats: FrameStats::new(report_interval),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

impl<S: Simulation> Simulation for Instrumented<S> {
    type Error = S::Error;

    fn fixed_step(&mut self, dt: f64) -> Result<(), S::Error> {
        self.inner.fixed_step(dt)?;
        self.stats.steps += 1;
        Ok(())
    }

    fn render_step(&mut self, alpha: f64) -> Result<(), S::Error> {
        self.inner.render_step(alpha)?;
        self.stats.frames += 1;

        let interval = self.stats.report_interval;
        if interval > 0 && self.stats.frames % interval == 0 {
            log::info!(
                "{} frames, {} fixed steps ({:.2} steps/frame over the last {})",
                self.stats.frames,
                self.stats.steps,
                self.stats.steps_per_frame_since_report(),
                interval
            );
            self.stats.steps_at_report = self.stats.steps;
        }
        Ok(())
    }
}

/// Owns the scheduler and the demo world
pub struct SimulationSystem<T: TimeSource = MonotonicTime> {
    scheduler: FrameScheduler<T>,
    world: Instrumented<DriftWorld>,
}

impl SimulationSystem<MonotonicTime> {
    /// Create a simulation system sampling real time
    pub fn new(config: &AppConfig) -> Result<Self, ClockError> {
        Self::with_time_source(config, MonotonicTime::new())
    }
}

impl<T: TimeSource> SimulationSystem<T> {
    /// Create a simulation system sampling the given time source
    pub fn with_time_source(config: &AppConfig, time: T) -> Result<Self, ClockError> {
        let clock = config.clock()?;
        let scheduler =
            FrameScheduler::with_time_source(clock, time).paused(config.timing.start_paused);
        let world = DriftWorld::new(config.world.clone());
        log::info!("Spawned {} bodies", world.body_count());

        Ok(Self {
            scheduler,
            world: Instrumented::new(world, config.debug.report_interval),
        })
    }

    /// Start the scheduler; the first frame follows on the next host tick
    pub fn start(&mut self) -> Result<(), StateError> {
        self.scheduler.start()
    }

    /// Run one frame
    pub fn frame(&mut self) -> Result<FrameReport, SchedulerError<WorldError>> {
        self.scheduler.frame(&mut self.world)
    }

    /// Drive frames from `host` until it stops, returning the frame count
    pub fn run<H: FrameHost>(&mut self, host: &mut H) -> Result<u64, SchedulerError<WorldError>> {
        let frames = self.scheduler.run(host, &mut self.world)?;
        let clock = self.scheduler.clock();
        log::info!(
            "Ran {} frames: {} fixed steps, {:.2}s simulated over {:.2}s of clamped wall time",
            frames,
            clock.step_count(),
            clock.elapsed_sim_time(),
            clock.elapsed_wall_time()
        );
        Ok(frames)
    }

    /// Apply an input action; returns `false` for actions this system does not handle
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::TogglePause => {
                self.scheduler.toggle_pause();
                true
            }
            InputAction::ResetWorld => {
                self.world.inner_mut().reset();
                true
            }
            InputAction::ToggleFullscreen | InputAction::Exit => false,
        }
    }

    pub fn world(&self) -> &DriftWorld {
        self.world.inner()
    }

    pub fn stats(&self) -> &FrameStats {
        self.world.stats()
    }

    pub fn scheduler(&self) -> &FrameScheduler<T> {
        &self.scheduler
    }

    /// One-line status for window titles
    pub fn status_line(&self) -> String {
        let world = self.world.inner();
        let centroid = world.centroid();
        let mut line = format!(
            "{} bodies | t={:.1}s | centroid ({:.1}, {:.1}, {:.1}) | speed {:.1}",
            world.body_count(),
            world.sim_time(),
            centroid.x,
            centroid.y,
            centroid.z,
            world.mean_speed()
        );
        if self.scheduler.is_paused() {
            line.push_str(" [paused]");
        }
        line
    }
}
