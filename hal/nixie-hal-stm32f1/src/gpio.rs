//! Digital output adapter
//!
//! Bridges any `embedded-hal` 1.0 output (embassy's `Output` included) to
//! [`nixie_hal::OutputPin`]. The pin level is tracked locally because the
//! nixie trait reads it through `&self`.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as EhOutputPin;
use nixie_hal::OutputPin;

/// Infallible output pin with a cached level
pub struct Pin<P> {
    inner: P,
    high: bool,
}

impl<P> Pin<P>
where
    P: EhOutputPin<Error = Infallible>,
{
    /// Wrap `inner`, driving it to `high`
    pub fn new(inner: P, high: bool) -> Self {
        let mut pin = Self { inner, high };
        pin.set_state(high);
        pin
    }
}

impl<P> OutputPin for Pin<P>
where
    P: EhOutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.inner.set_high().unwrap_or_else(|e| match e {});
        self.high = true;
    }

    fn set_low(&mut self) {
        self.inner.set_low().unwrap_or_else(|e| match e {});
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
