//! Pulse-width output abstraction

/// Single pulse-width modulated output channel
pub trait PwmOutput {
    /// Duty value that keeps the output on for the whole period
    fn max_duty(&self) -> u16;

    /// Program the duty cycle, `0..=max_duty()`
    fn set_duty(&mut self, duty: u16);
}
