//! Vector math for the fixedloop runtime
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Vec2`] - 2D vector with x, y components
//! - [`VecArg`] - Typed polymorphic argument accepted by constructors and mutators
//!
//! Every arithmetic operation comes in two forms: a pure one that returns a new
//! vector, and an `_in_place` one that mutates the receiver. Normalizing a
//! zero-length vector divides by zero and yields non-finite components; callers
//! are expected to check `length()` first.

mod arg;
mod vec2;
mod vec3;

pub use arg::VecArg;
pub use vec2::Vec2;
pub use vec3::Vec3;
