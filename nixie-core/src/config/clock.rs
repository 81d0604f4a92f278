//! Clock chip configuration
//!
//! Compile-time constants describing the clock chip on the bus: where it
//! lives, which control value it must hold and what it is reset to when it
//! reports invalid data.

use crate::rtc::registers::{RegisterBlock, DEFAULT_TIME};

/// 7-bit bus address of DS1307-compatible clock chips
pub const DS1307_ADDRESS: u8 = 0x68;

/// DS1307 control value: square-wave output enabled at 1 Hz
pub const DS1307_CONTROL: u8 = 0x10;

/// Clock chip configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Address byte selecting the chip for writing
    pub write_address: u8,
    /// Address byte selecting the chip for reading
    pub read_address: u8,
    /// First register of the block
    pub register_index: u8,
    /// Control register value enforced after every read
    pub control: u8,
    /// Block written back when the chip reports halted
    pub default_time: RegisterBlock,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DS1307
    }
}

impl ClockConfig {
    /// DS1307 at its fixed address, 1 Hz square wave
    pub const DS1307: Self = Self::new(DS1307_ADDRESS, DS1307_CONTROL, DEFAULT_TIME);

    /// Configuration for a chip at a 7-bit `address`
    ///
    /// The direction bit is the address byte's LSB, so the two address
    /// bytes differ only there.
    pub const fn new(address: u8, control: u8, default_time: RegisterBlock) -> Self {
        Self {
            write_address: address << 1,
            read_address: (address << 1) | 1,
            register_index: 0,
            control,
            default_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ds1307_addresses() {
        let config = ClockConfig::DS1307;
        assert_eq!(config.write_address, 0b1101_0000);
        assert_eq!(config.read_address, 0b1101_0001);
        assert_eq!(config.register_index, 0);
        assert_eq!(config.control, 0x10);
    }

    #[test]
    fn test_default_time_carries_control() {
        let config = ClockConfig::default();
        assert_eq!(config.default_time.control(), config.control);
    }
}
