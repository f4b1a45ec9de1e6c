//! Input handling module
//!
//! Maps raw key presses to the few actions the runtime responds to.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
