//! Pulse-width output adapter
//!
//! Bridges an `embedded-hal` 1.0 duty-cycle channel, such as a channel of
//! embassy's `SimplePwm`, to [`nixie_hal::PwmOutput`].

use core::convert::Infallible;

use embedded_hal::pwm::SetDutyCycle;
use nixie_hal::PwmOutput;

/// Single PWM channel
pub struct PwmChannel<C> {
    inner: C,
}

impl<C> PwmChannel<C>
where
    C: SetDutyCycle<Error = Infallible>,
{
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C> PwmOutput for PwmChannel<C>
where
    C: SetDutyCycle<Error = Infallible>,
{
    fn max_duty(&self) -> u16 {
        self.inner.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        self.inner
            .set_duty_cycle(duty.min(self.inner.max_duty_cycle()))
            .unwrap_or_else(|e| match e {});
    }
}
