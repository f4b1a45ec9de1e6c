//! Demo world driven by the frame scheduler
//!
//! Bodies steer toward random targets inside a cube. Every fixed step
//! integrates velocity and position; every render step interpolates between
//! the last two simulated positions and projects the result to screen space.

use fixedloop_core::Simulation;
use fixedloop_math::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key to a body in a [`DriftWorld`]
    pub struct BodyKey;
}

/// Bodies closer than this to their target pick a new one
const ARRIVAL_RADIUS: f64 = 1.0;

/// Demo world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of bodies spawned on reset
    pub body_count: usize,
    /// Speed cap (units per second)
    pub max_speed: f64,
    /// Steering acceleration cap (units per second squared)
    pub max_force: f64,
    /// Half-extent of the cube bodies live in
    pub bounds: f64,
    /// RNG seed; equal seeds give equal worlds
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            body_count: 64,
            max_speed: 40.0,
            max_force: 60.0,
            bounds: 100.0,
            seed: 7,
        }
    }
}

/// A steering body
#[derive(Debug, Clone, Copy)]
pub struct Body {
    /// Position after the latest fixed step
    pub position: Vec3,
    /// Position before the latest fixed step
    pub previous: Vec3,
    pub velocity: Vec3,
    pub target: Vec3,
    /// Interpolated position from the latest render step
    pub rendered: Vec3,
    /// Projected screen position from the latest render step
    pub screen: Vec2,
}

/// World state became unusable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldError {
    /// A body's state is NaN or infinite
    NonFinite(BodyKey),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::NonFinite(key) => write!(f, "Body {:?} has a non-finite state", key),
        }
    }
}

impl std::error::Error for WorldError {}

/// The demo world
pub struct DriftWorld {
    config: WorldConfig,
    bodies: SlotMap<BodyKey, Body>,
    rng: StdRng,
    sim_time: f64,
    renders: u64,
}

impl DriftWorld {
    /// Create a world and spawn its bodies
    pub fn new(mut config: WorldConfig) -> Self {
        if !(config.bounds.is_finite() && config.bounds >= 1.0) {
            log::warn!("World bounds {} out of range, using 1.0", config.bounds);
            config.bounds = 1.0;
        }
        if !(config.max_speed.is_finite() && config.max_speed >= 0.0) {
            log::warn!("World max_speed {} out of range, using 0.0", config.max_speed);
            config.max_speed = 0.0;
        }
        if !(config.max_force.is_finite() && config.max_force >= 0.0) {
            log::warn!("World max_force {} out of range, using 0.0", config.max_force);
            config.max_force = 0.0;
        }
        let rng = StdRng::seed_from_u64(config.seed);
        let mut world = Self {
            config,
            bodies: SlotMap::with_key(),
            rng,
            sim_time: 0.0,
            renders: 0,
        };
        world.spawn_bodies();
        world
    }

    /// Drop all bodies and respawn them from the configured seed
    pub fn reset(&mut self) {
        self.bodies = SlotMap::with_key();
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.sim_time = 0.0;
        self.spawn_bodies();
        log::info!("World reset with {} bodies", self.bodies.len());
    }

    fn spawn_bodies(&mut self) {
        for _ in 0..self.config.body_count {
            let position = self.random_point();
            let target = self.random_point();
            self.bodies.insert(Body {
                position,
                previous: position,
                velocity: Vec3::ZERO,
                target,
                rendered: position,
                screen: Self::project(position, self.config.bounds),
            });
        }
    }

    fn random_point(&mut self) -> Vec3 {
        let b = self.config.bounds;
        Vec3::new(
            self.rng.random_range(-b..b),
            self.rng.random_range(-b..b),
            self.rng.random_range(-b..b),
        )
    }

    /// Perspective projection onto the z = 0 plane, viewed from z = -3 * bounds
    fn project(point: Vec3, bounds: f64) -> Vec2 {
        let distance = 3.0 * bounds;
        let scale = distance / (point.z + distance);
        Vec2::new(point.x * scale, point.y * scale)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body)> {
        self.bodies.iter()
    }

    /// Simulated seconds since the last reset
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Render steps since construction
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Mean interpolated position
    pub fn centroid(&self) -> Vec3 {
        if self.bodies.is_empty() {
            return Vec3::ZERO;
        }
        let mut sum = Vec3::ZERO;
        for body in self.bodies.values() {
            sum.add_in_place(body.rendered);
        }
        sum.multiply_scalar(1.0 / self.bodies.len() as f64)
    }

    /// Mean speed over all bodies
    pub fn mean_speed(&self) -> f64 {
        if self.bodies.is_empty() {
            return 0.0;
        }
        let total: f64 = self.bodies.values().map(|b| b.velocity.length()).sum();
        total / self.bodies.len() as f64
    }
}

impl Simulation for DriftWorld {
    type Error = WorldError;

    fn fixed_step(&mut self, dt: f64) -> Result<(), WorldError> {
        let WorldConfig {
            max_speed,
            max_force,
            bounds,
            ..
        } = self.config;

        let mut arrived = Vec::new();
        for (key, body) in self.bodies.iter_mut() {
            body.previous = body.position;

            let mut desired = body.target.sub(body.position);
            if desired.length() < ARRIVAL_RADIUS {
                arrived.push(key);
            } else {
                desired.set_length_in_place(max_speed);
            }

            let mut steering = desired.sub(body.velocity);
            steering.limit(max_force);
            body.velocity
                .add_in_place(steering.multiply_scalar(dt))
                .limit(max_speed);
            body.position.add_in_place(body.velocity.multiply_scalar(dt));

            // reflect off the walls
            for (p, v) in [
                (&mut body.position.x, &mut body.velocity.x),
                (&mut body.position.y, &mut body.velocity.y),
                (&mut body.position.z, &mut body.velocity.z),
            ] {
                if p.abs() > bounds {
                    *p = p.clamp(-bounds, bounds);
                    *v = -*v;
                }
            }

            if !(body.position.is_finite() && body.velocity.is_finite()) {
                return Err(WorldError::NonFinite(key));
            }
        }

        for key in arrived {
            let target = self.random_point();
            if let Some(body) = self.bodies.get_mut(key) {
                body.target = target;
            }
        }

        self.sim_time += dt;
        Ok(())
    }

    fn render_step(&mut self, alpha: f64) -> Result<(), WorldError> {
        let bounds = self.config.bounds;
        for (key, body) in self.bodies.iter_mut() {
            body.rendered = body.previous.lerp(body.position, alpha);
            if !body.rendered.is_finite() {
                return Err(WorldError::NonFinite(key));
            }
            body.screen = Self::project(body.rendered, bounds);
        }
        self.renders += 1;
        Ok(())
    }
}
