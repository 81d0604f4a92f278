//! Real-time-clock chip protocol
//!
//! Register block model and the read/write continuation chains built on
//! the bus engine.

pub mod protocol;
pub mod registers;

pub use protocol::{ClockProtocol, ReadOutcome, Repair, Step};
pub use registers::{Register, RegisterBlock, Time, DEFAULT_TIME};
