//! Host-side bus doubles shared by the unit tests

use heapless::Vec;
use nixie_hal::TwiController;

/// One command issued to the bus controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Start,
    Write(u8),
    Read { ack: bool },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Addressing {
    /// Next written byte is a device address
    Address,
    /// Next written byte is the register pointer
    Pointer,
    /// Written bytes land in memory
    Writing,
    /// Reads come out of memory
    Reading,
    /// Another device was addressed; ignore traffic until the next start
    Ignored,
}

/// Bus controller with a DS1307-style clock chip attached
///
/// Every command that would raise a completion interrupt bumps `pending`;
/// tests play the interrupt by taking events and calling into the engine.
pub struct SimRtc {
    pub ops: Vec<Op, 128>,
    pub memory: [u8; 8],
    pub address: u8,
    pointer: usize,
    latched: u8,
    addressing: Addressing,
    pending: u8,
    pub acknowledged: u32,
}

impl SimRtc {
    pub fn new(memory: [u8; 8]) -> Self {
        Self {
            ops: Vec::new(),
            memory,
            address: 0x68,
            pointer: 0,
            latched: 0,
            addressing: Addressing::Ignored,
            pending: 0,
            acknowledged: 0,
        }
    }

    /// Completion interrupts raised but not yet serviced
    pub fn pending(&self) -> u8 {
        self.pending
    }

    /// Consume one completion interrupt
    pub fn take_event(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn writes(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Write(_))).count()
    }

    fn log(&mut self, op: Op) {
        self.ops.push(op).expect("op log full");
    }
}

impl TwiController for SimRtc {
    fn start(&mut self) {
        self.log(Op::Start);
        self.addressing = Addressing::Address;
        self.pending += 1;
    }

    fn write(&mut self, byte: u8) {
        self.log(Op::Write(byte));
        self.addressing = match self.addressing {
            Addressing::Address if byte == self.address << 1 => Addressing::Pointer,
            Addressing::Address if byte == (self.address << 1) | 1 => Addressing::Reading,
            Addressing::Address => Addressing::Ignored,
            Addressing::Pointer => {
                self.pointer = byte as usize % self.memory.len();
                Addressing::Writing
            }
            Addressing::Writing => {
                self.memory[self.pointer] = byte;
                self.pointer = (self.pointer + 1) % self.memory.len();
                Addressing::Writing
            }
            other => other,
        };
        self.pending += 1;
    }

    fn read(&mut self, ack: bool) {
        self.log(Op::Read { ack });
        if self.addressing == Addressing::Reading {
            self.latched = self.memory[self.pointer];
            self.pointer = (self.pointer + 1) % self.memory.len();
        } else {
            self.latched = 0xFF;
        }
        self.pending += 1;
    }

    fn data(&mut self) -> u8 {
        self.latched
    }

    fn stop(&mut self) {
        self.log(Op::Stop);
        self.addressing = Addressing::Ignored;
    }

    fn acknowledge(&mut self) -> bool {
        self.acknowledged += 1;
        true
    }
}

/// Command whose completion flag the controller is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Awaiting {
    Nothing,
    Start,
    Transmit,
    Receive,
}

/// [`SimRtc`] behind a controller with level-triggered status flags
///
/// Models the STM32F1 event register: the interrupt stays asserted while
/// events are enabled and any flag is set, and the byte-finished flag
/// survives a start or stop request until [`settle`](Self::settle) lets
/// the condition be generated.
pub struct LevelRtc {
    pub rtc: SimRtc,
    started: bool,
    address_done: bool,
    byte_done: bool,
    received: bool,
    /// Next write is an address byte
    addressing: bool,
    start_requested: bool,
    stop_requested: bool,
    enabled: bool,
    awaiting: Awaiting,
    /// Last entry was not the awaited event
    dropped: bool,
    pub stale: u32,
}

impl LevelRtc {
    pub fn new(memory: [u8; 8]) -> Self {
        Self {
            rtc: SimRtc::new(memory),
            started: false,
            address_done: false,
            byte_done: false,
            received: false,
            addressing: false,
            start_requested: false,
            stop_requested: false,
            enabled: false,
            awaiting: Awaiting::Nothing,
            dropped: false,
            stale: 0,
        }
    }

    /// Interrupt line level
    pub fn asserted(&self) -> bool {
        self.enabled && (self.started || self.address_done || self.byte_done || self.received)
    }

    /// Whether the last entry was ignored, i.e. the line only drops once
    /// the hardware catches up
    pub fn dropped(&self) -> bool {
        self.dropped
    }

    /// Generate requested stop and start conditions
    ///
    /// Returns `false` when nothing was outstanding.
    pub fn settle(&mut self) -> bool {
        if !self.start_requested && !self.stop_requested {
            return false;
        }
        if self.stop_requested {
            self.stop_requested = false;
            self.byte_done = false;
        }
        if self.start_requested {
            self.start_requested = false;
            self.byte_done = false;
            self.started = true;
        }
        self.dropped = false;
        true
    }
}

impl TwiController for LevelRtc {
    fn start(&mut self) {
        self.rtc.start();
        self.awaiting = Awaiting::Start;
        self.addressing = true;
        self.start_requested = true;
        self.enabled = true;
    }

    fn write(&mut self, byte: u8) {
        self.rtc.write(byte);
        self.awaiting = Awaiting::Transmit;
        self.started = false;
        self.byte_done = false;
        if self.addressing {
            self.addressing = false;
            self.address_done = true;
        } else {
            self.byte_done = true;
        }
    }

    fn read(&mut self, ack: bool) {
        self.rtc.read(ack);
        self.awaiting = Awaiting::Receive;
        self.received = true;
    }

    fn data(&mut self) -> u8 {
        self.received = false;
        self.rtc.data()
    }

    fn stop(&mut self) {
        self.rtc.stop();
        self.awaiting = Awaiting::Nothing;
        self.stop_requested = true;
        self.enabled = false;
    }

    fn acknowledge(&mut self) -> bool {
        let awaited = match self.awaiting {
            Awaiting::Start => self.started,
            Awaiting::Transmit if self.address_done => {
                self.address_done = false;
                true
            }
            Awaiting::Transmit => self.byte_done,
            Awaiting::Receive => self.received,
            Awaiting::Nothing => false,
        };
        if !awaited {
            self.stale += 1;
            self.dropped = true;
        }
        awaited
    }
}
