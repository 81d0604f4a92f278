//! Clock read/write protocol
//!
//! Both transactions are fixed continuation chains on the bus engine. Each
//! [`Step`] names what to do when the previous hardware step completes:
//!
//! ```text
//! read:  start ─► send [W, idx] ─► start ─► send [R] ─► recv 8 ─► stop ─► validate
//! write: start ─► send [W, idx] ─► send block ─► stop
//! ```
//!
//! Validation runs after every read, never after a write. A halted clock
//! is reset to the configured default time, a wrong control byte is
//! corrected, and either repair issues a write-back that nothing waits for.

use nixie_hal::TwiController;

use crate::bus::{BusEngine, BusError};
use crate::config::ClockConfig;
use crate::state::EventFlag;

use super::registers::{Register, RegisterBlock, REGISTER_COUNT};

/// Continuation tags of the read and write chains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Start issued; select the chip for writing and point at the block
    ReadStarted,
    /// Pointer written; repeated start
    ReadIndexed,
    /// Repeated start issued; select the chip for reading
    ReadRestarted,
    /// Chip selected for reading; receive the block
    ReadAddressed,
    /// Block received; stop and validate
    ReadReceived,
    /// Start issued; select the chip for writing and point at the block
    WriteStarted,
    /// Pointer written; send the block
    WriteIndexed,
    /// Block sent; stop
    WriteSent,
}

/// Corrections applied by the last validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Repair {
    /// Clock was halted; the whole block was replaced by the default time
    pub defaults: bool,
    /// Control register held the wrong value
    pub control: bool,
}

impl Repair {
    /// Check if a write-back was issued
    pub fn needs_write(&self) -> bool {
        self.defaults || self.control
    }
}

/// Result of a completed read chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadOutcome {
    /// Register block after validation
    pub registers: RegisterBlock,
    /// Corrections made before the block was published
    pub repair: Repair,
}

/// Clock protocol driver
///
/// Owns the bus engine and the register block, the single source of truth
/// for the last known time.
pub struct ClockProtocol<T> {
    bus: BusEngine<T, Step>,
    registers: RegisterBlock,
    config: ClockConfig,
}

impl<T: TwiController> ClockProtocol<T> {
    /// Create a protocol driver around a configured bus controller
    pub const fn new(twi: T, config: ClockConfig) -> Self {
        Self {
            bus: BusEngine::new(twi),
            registers: RegisterBlock::from_bytes([0; REGISTER_COUNT]),
            config,
        }
    }

    /// Last register block read (or repaired)
    pub fn registers(&self) -> &RegisterBlock {
        &self.registers
    }

    /// Check if a transaction is in flight
    pub fn is_busy(&self) -> bool {
        self.bus.is_busy()
    }

    /// Borrow the bus engine
    pub fn bus(&self) -> &BusEngine<T, Step> {
        &self.bus
    }

    /// Mutably borrow the bus engine
    pub fn bus_mut(&mut self) -> &mut BusEngine<T, Step> {
        &mut self.bus
    }

    /// Begin reading the whole register block
    ///
    /// Fails fast with [`BusError::Busy`] while any transaction is in
    /// flight; the request is dropped and the next trigger retries.
    pub fn read_async(&mut self) -> Result<(), BusError> {
        self.bus.start_async(Step::ReadStarted)
    }

    /// Begin writing the register block verbatim
    pub fn write_async(&mut self) -> Result<(), BusError> {
        self.bus.start_async(Step::WriteStarted)
    }

    /// Advance the active chain from the bus-completion interrupt
    ///
    /// When a read chain finishes, the block is validated, any write-back
    /// is started, and only then is `time_changed` raised. The validated
    /// block is returned for logging.
    pub fn on_bus_event(&mut self, time_changed: &EventFlag) -> Option<ReadOutcome> {
        let step = self.bus.interrupt()?;
        let outcome = self.resume(step)?;
        time_changed.raise();
        Some(outcome)
    }

    fn resume(&mut self, step: Step) -> Option<ReadOutcome> {
        let select = [self.config.write_address, self.config.register_index];

        match step {
            Step::ReadStarted => chain(self.bus.send_async(&select, Step::ReadIndexed)),
            Step::ReadIndexed => chain(self.bus.start_async(Step::ReadRestarted)),
            Step::ReadRestarted => {
                let read = [self.config.read_address];
                chain(self.bus.send_async(&read, Step::ReadAddressed))
            }
            Step::ReadAddressed => chain(self.bus.recv_async(REGISTER_COUNT, Step::ReadReceived)),
            Step::ReadReceived => {
                if let Ok(bytes) = <[u8; REGISTER_COUNT]>::try_from(self.bus.received()) {
                    self.registers = RegisterBlock::from_bytes(bytes);
                }
                chain(self.bus.stop_async());
                return Some(self.validate());
            }
            Step::WriteStarted => chain(self.bus.send_async(&select, Step::WriteIndexed)),
            Step::WriteIndexed => {
                chain(self.bus.send_async(self.registers.as_bytes(), Step::WriteSent))
            }
            Step::WriteSent => chain(self.bus.stop_async()),
        }
        None
    }

    /// Repair the freshly read block and write it back if anything changed
    fn validate(&mut self) -> ReadOutcome {
        let mut repair = Repair::default();

        if self.registers.is_halted() {
            self.registers = self.config.default_time;
            repair.defaults = true;
        }
        if self.registers.control() != self.config.control {
            self.registers.set(Register::Control, self.config.control);
            repair.control = true;
        }
        if repair.needs_write() {
            chain(self.write_async());
        }

        ReadOutcome {
            registers: self.registers,
            repair,
        }
    }
}

/// Chained requests run from a continuation, with the engine idle, so only
/// a malformed chain can have one refused. The chain would stall with no
/// further interrupt, so that halts.
fn chain(result: Result<(), BusError>) {
    if let Err(e) = result {
        panic!("chained bus request refused: {:?}", e);
    }
}
