//! Device abstraction traits
//!
//! These traits define the interface between the clock logic and the
//! driver implementations in `nixie-drivers`.

pub mod display;

pub use display::TimeDisplay;
