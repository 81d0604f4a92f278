//! Board-agnostic core logic for the Nixie clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Interrupt-driven two-wire bus engine with continuation hand-off
//! - Clock chip read/write protocol, validation and repair
//! - Event flags between interrupt context and the idle loop
//! - Foreground loop (display refresh, watchdog supervision)
//! - Clock configuration constants

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod config;
pub mod rtc;
pub mod state;
pub mod traits;

#[cfg(test)]
mod testing;
