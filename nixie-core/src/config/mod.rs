//! Configuration types
//!
//! Everything here is fixed at compile time; the clock has no runtime
//! configuration surface.

pub mod clock;

pub use clock::*;
