//! Square-wave trigger input
//!
//! The clock chip's 1 Hz square-wave output on PA0, raising `EXTI0` on
//! every rising edge. The line is programmed directly so the firmware owns
//! the vector instead of embassy's EXTI future machinery.

use embassy_stm32::gpio::{Input, Pull};
use embassy_stm32::pac;
use embassy_stm32::peripherals::{EXTI0, PA0};
use embassy_stm32::Peri;

const LINE: usize = 0;

/// Rising-edge interrupt on PA0
pub struct SquareWaveTrigger<'d> {
    _input: Input<'d>,
    _channel: Peri<'d, EXTI0>,
}

impl<'d> SquareWaveTrigger<'d> {
    /// Configure PA0 as a pulled-up input and arm EXTI line 0 for rising
    /// edges. The `EXTI0` vector is left masked in the NVIC.
    pub fn new(pin: Peri<'d, PA0>, channel: Peri<'d, EXTI0>) -> Self {
        // The square-wave output is open drain
        let input = Input::new(pin, Pull::Up);

        // Port A is the reset value of EXTICR1
        pac::AFIO.exticr(0).modify(|w| w.set_exti(LINE, 0));
        pac::EXTI.ftsr(0).modify(|w| w.set_line(LINE, false));
        pac::EXTI.rtsr(0).modify(|w| w.set_line(LINE, true));
        Self::acknowledge();
        pac::EXTI.imr(0).modify(|w| w.set_line(LINE, true));

        Self {
            _input: input,
            _channel: channel,
        }
    }

    /// Clear the pending edge, first thing in the `EXTI0` handler
    pub fn acknowledge() {
        pac::EXTI.pr(0).write(|w| w.set_line(LINE, true));
    }
}
