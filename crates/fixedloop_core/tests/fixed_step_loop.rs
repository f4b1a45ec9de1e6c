//! Integration tests for the fixed-step frame loop
//!
//! Drives a small ballistic world through the scheduler with scripted frame
//! timings and checks that the simulated result does not depend on frame rate.

use fixedloop_core::{FrameHost, FrameScheduler, ManualTime, SimulationClock, Simulation};
use fixedloop_math::Vec3;

/// Host that advances manual time by a scripted delta per frame
struct ScriptedHost {
    time: ManualTime,
    deltas: Vec<f64>,
    next: usize,
}

impl ScriptedHost {
    fn uniform(time: ManualTime, delta: f64, frames: usize) -> Self {
        Self {
            time,
            deltas: vec![delta; frames],
            next: 0,
        }
    }
}

impl FrameHost for ScriptedHost {
    fn next_frame(&mut self) -> bool {
        let Some(delta) = self.deltas.get(self.next) else {
            return false;
        };
        self.time.advance(*delta);
        self.next += 1;
        true
    }
}

#[derive(Default)]
struct Projectile {
    previous: Vec3,
    position: Vec3,
    velocity: Vec3,
    steps: u32,
    rendered: Vec<Vec3>,
}

impl Simulation for Projectile {
    type Error = std::convert::Infallible;

    fn fixed_step(&mut self, dt: f64) -> Result<(), Self::Error> {
        self.previous = self.position;
        self.velocity.add_in_place((0.0, -9.81 * dt, 0.0));
        self.velocity.limit(20.0);
        self.position.add_in_place(self.velocity.multiply_scalar(dt));
        self.steps += 1;
        Ok(())
    }

    fn render_step(&mut self, alpha: f64) -> Result<(), Self::Error> {
        self.rendered.push(self.previous.lerp(self.position, alpha));
        Ok(())
    }
}

fn run(delta: f64, frames: usize) -> Projectile {
    let time = ManualTime::new(0.0);
    let clock = SimulationClock::new(0.02).unwrap();
    let mut scheduler = FrameScheduler::with_time_source(clock, time.clone());
    let mut host = ScriptedHost::uniform(time, delta, frames);
    let mut world = Projectile {
        velocity: Vec3::new(3.0, 10.0, 0.0),
        ..Default::default()
    };
    let ran = scheduler.run(&mut host, &mut world).unwrap();
    assert_eq!(ran as usize, frames);
    world
}

#[test]
fn test_result_independent_of_frame_rate() {
    // 1.01s of wall time at two different refresh rates
    let slow = run(0.0101, 100);
    let fast = run(0.005, 202);

    assert_eq!(slow.steps, 50);
    assert_eq!(fast.steps, 50);
    assert_eq!(slow.position, fast.position);
    assert_eq!(slow.velocity, fast.velocity);
}

#[test]
fn test_one_render_per_frame() {
    let world = run(1.0 / 144.0, 300);
    assert_eq!(world.rendered.len(), 300);
}

#[test]
fn test_interpolated_positions_stay_between_states() {
    let world = run(0.007, 40);
    let last = world.rendered.last().copied().unwrap();
    let min_x = world.previous.x.min(world.position.x);
    let max_x = world.previous.x.max(world.position.x);
    assert!(last.x >= min_x - 1e-12 && last.x <= max_x + 1e-12);
}

#[test]
fn test_stall_is_clamped_in_loop() {
    let time = ManualTime::new(0.0);
    let clock = SimulationClock::new(0.02).unwrap();
    let mut scheduler = FrameScheduler::with_time_source(clock, time.clone());
    let mut host = ScriptedHost {
        time,
        deltas: vec![0.016, 10.0, 0.016],
        next: 0,
    };
    let mut world = Projectile::default();
    scheduler.run(&mut host, &mut world).unwrap();

    // 0.016 + 0.25 (clamped) + 0.016 = 0.282s → 14 steps
    assert_eq!(world.steps, 14);
    assert_eq!(world.rendered.len(), 3);
}
