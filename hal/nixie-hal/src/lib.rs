//! Nixie Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The clock logic in `nixie-core` and the display
//! driver in `nixie-drivers` only ever see these traits, which is what lets
//! them run under host tests against mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nixie-firmware (interrupt wiring)      │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │   nixie-core    │   │  nixie-drivers  │
//! └─────────────────┘   └─────────────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ nixie-hal-stm32f1   │
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`twi::TwiController`] - Byte-at-a-time two-wire bus controller
//! - [`gpio::OutputPin`] - Digital output
//! - [`pwm::PwmOutput`] - Pulse-width output
//! - [`watchdog::Watchdog`] - Hardware watchdog

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod twi;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use pwm::PwmOutput;
pub use twi::{TwiConfig, TwiController};
pub use watchdog::Watchdog;
