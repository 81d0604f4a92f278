//! Asynchronous two-wire bus transactions
//!
//! One bus transaction at a time is driven from the controller's completion
//! interrupt, one byte or one bus condition per interrupt.

pub mod engine;

pub use engine::{BusEngine, BusError, Phase, MAX_TRANSFER};
