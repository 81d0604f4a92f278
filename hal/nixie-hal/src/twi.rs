//! Two-wire bus abstractions
//!
//! The bus controller is driven one bus condition or one byte at a time.
//! Every [`TwiController::start`], [`TwiController::write`] and
//! [`TwiController::read`] call ends in exactly one acknowledged completion
//! interrupt once the hardware has finished; [`TwiController::stop`] raises
//! none and masks bus events until the next start.
//!
//! Controllers with level-triggered status flags may enter the interrupt
//! before the requested step is done. [`TwiController::acknowledge`]
//! reports those entries so they can be ignored.

/// Byte-level two-wire bus controller (master mode)
///
/// Calls return as soon as the hardware has been told what to do. Completion
/// is reported through the controller's interrupt, not through the return
/// value.
pub trait TwiController {
    /// Issue a start condition, or a repeated start if the bus is still held
    fn start(&mut self);

    /// Shift one byte out (device address or payload)
    fn write(&mut self, byte: u8);

    /// Clock one byte in
    ///
    /// # Arguments
    /// * `ack` - Acknowledge the byte (more bytes expected) or leave it
    ///   unacknowledged (last byte of the transfer)
    fn read(&mut self, ack: bool);

    /// Byte latched by the most recently completed [`read`](Self::read)
    fn data(&mut self) -> u8;

    /// Issue a stop condition and release the bus
    fn stop(&mut self);

    /// Clear the pending completion event
    ///
    /// Called first thing in the completion interrupt. Returns `false` if
    /// the event the last command waits for has not happened yet, e.g. a
    /// flag left over from the previous step is still holding the interrupt
    /// asserted. Controllers with one edge per completion can keep the
    /// default.
    fn acknowledge(&mut self) -> bool {
        true
    }
}

/// Two-wire bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TwiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for TwiConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TwiConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Clock divider for a peripheral clocked at `pclk_hz`
    ///
    /// Standard-mode controllers hold SCL low and high for one divider
    /// period each, so the divider is `pclk / (2 * f)`, never below 4.
    pub const fn divider(&self, pclk_hz: u32) -> u16 {
        let div = pclk_hz / (2 * self.frequency);
        if div < 4 {
            4
        } else if div > 0x0FFF {
            0x0FFF
        } else {
            div as u16
        }
    }
}
