//! Clock chip register block
//!
//! Wire layout of the eight registers at device index 0:
//!
//! ```text
//! ┌─────────┬─────────┬───────┬─────────┬──────┬───────┬──────┬─────────┐
//! │ SECONDS │ MINUTES │ HOURS │ WEEKDAY │ DATE │ MONTH │ YEAR │ CONTROL │
//! │ CH|BCD  │ BCD     │ BCD   │ 1-7     │ BCD  │ BCD   │ BCD  │ raw     │
//! └─────────┴─────────┴───────┴─────────┴──────┴───────┴──────┴─────────┘
//! ```
//!
//! Bit 7 of SECONDS is the clock-halt flag: the oscillator is stopped and
//! the time registers hold no valid data.

/// Number of registers in the block
pub const REGISTER_COUNT: usize = 8;

/// Clock-halt flag in the seconds register
pub const HALT_BIT: u8 = 0x80;

/// Register offsets within the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    Seconds = 0,
    Minutes = 1,
    Hours = 2,
    Weekday = 3,
    Date = 4,
    Month = 5,
    Year = 6,
    Control = 7,
}

/// Date and time the clock is reset to when it reports halted:
/// 13:39:00, weekday 3, 28.10.(20)13, square-wave output at 1 Hz.
pub const DEFAULT_TIME: RegisterBlock =
    RegisterBlock::from_bytes([0x00, 0x39, 0x13, 0x03, 0x28, 0x10, 0x13, 0x10]);

/// The clock chip's register block, byte for byte as it goes over the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock([u8; REGISTER_COUNT]);

impl RegisterBlock {
    /// Wrap raw register bytes
    pub const fn from_bytes(bytes: [u8; REGISTER_COUNT]) -> Self {
        Self(bytes)
    }

    /// Raw register bytes in wire order
    pub const fn as_bytes(&self) -> &[u8; REGISTER_COUNT] {
        &self.0
    }

    /// Read one register
    pub const fn get(&self, register: Register) -> u8 {
        self.0[register as usize]
    }

    /// Overwrite one register
    pub fn set(&mut self, register: Register, value: u8) {
        self.0[register as usize] = value;
    }

    pub const fn seconds(&self) -> u8 {
        self.get(Register::Seconds)
    }

    pub const fn minutes(&self) -> u8 {
        self.get(Register::Minutes)
    }

    pub const fn hours(&self) -> u8 {
        self.get(Register::Hours)
    }

    pub const fn control(&self) -> u8 {
        self.get(Register::Control)
    }

    /// Check the clock-halt flag
    pub const fn is_halted(&self) -> bool {
        self.seconds() & HALT_BIT != 0
    }

    /// Hours and minutes as packed BCD, the form the display takes
    pub const fn hours_minutes(&self) -> (u8, u8) {
        (self.hours(), self.minutes())
    }

    /// Decoded time of day (24-hour mode)
    pub const fn time(&self) -> Time {
        Time {
            hours: bcd_to_binary(self.hours() & 0x3F),
            minutes: bcd_to_binary(self.minutes() & 0x7F),
            seconds: bcd_to_binary(self.seconds() & !HALT_BIT),
        }
    }
}

/// Time of day in binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// Packed BCD to binary (`0x59` -> 59)
const fn bcd_to_binary(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}
