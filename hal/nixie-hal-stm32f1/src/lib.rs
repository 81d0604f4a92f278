//! STM32F1-specific HAL for the Nixie firmware
//!
//! This crate provides STM32F1 implementations of the `nixie-hal` traits,
//! plus the interrupt sources the clock is built around. It targets the
//! STM32F103C8 (Blue Pill).
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Peripherals the firmware drives from its own interrupt handlers (the
//! two-wire controller, the square-wave trigger and the tick timer) are
//! programmed at register level through `embassy_stm32::pac`, since their
//! interrupt vectors belong to the firmware rather than to embassy.
//! Everything else wraps the embassy drivers.

#![no_std]

pub mod gpio;
pub mod pwm;
pub mod tick;
pub mod trigger;
pub mod twi;
pub mod watchdog;

pub use gpio::Pin;
pub use pwm::PwmChannel;
pub use tick::TickTimer;
pub use trigger::SquareWaveTrigger;
pub use twi::TwiV1;
pub use watchdog::Iwdg;
