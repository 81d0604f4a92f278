//! Interrupt-to-foreground handoff
//!
//! Interrupt handlers raise level-triggered flags; the foreground loop
//! polls them, does the work and clears only what it observed.

pub mod flags;
pub mod main_loop;

pub use flags::{EventFlag, Flags, Ticket};
pub use main_loop::{MainLoop, Serviced};
