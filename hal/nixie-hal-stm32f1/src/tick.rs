//! Periodic tick timer
//!
//! TIM2 counting at 10 kHz with an update interrupt every period. The
//! firmware uses it as the watchdog service tick.

use embassy_stm32::pac;
use embassy_stm32::peripherals::TIM2;
use embassy_stm32::Peri;

/// Counter clock after the prescaler
const COUNT_HZ: u32 = 10_000;

/// TIM2 update interrupt source
pub struct TickTimer<'d> {
    _peri: Peri<'d, TIM2>,
}

impl<'d> TickTimer<'d> {
    /// Start TIM2 with an update event every `period_ms`
    ///
    /// # Arguments
    /// - `timer_clock_hz`: TIM2 kernel clock (APB1 timer clock)
    /// - `period_ms`: Tick period, 1..=6553 ms
    pub fn start(peri: Peri<'d, TIM2>, timer_clock_hz: u32, period_ms: u16) -> Self {
        let psc = (timer_clock_hz / COUNT_HZ).saturating_sub(1) as u16;
        let arr = (u32::from(period_ms.clamp(1, 6553)) * (COUNT_HZ / 1000) - 1) as u16;

        pac::RCC.apb1enr().modify(|w| w.set_tim2en(true));

        let regs = pac::TIM2;
        regs.cr1().modify(|w| w.set_cen(false));
        regs.psc().write_value(psc);
        regs.arr().write(|w| w.set_arr(arr));
        // Load the prescaler now rather than at the first overflow
        regs.egr().write(|w| w.set_ug(true));
        Self::acknowledge();
        regs.dier().modify(|w| w.set_uie(true));
        regs.cr1().modify(|w| w.set_cen(true));

        Self { _peri: peri }
    }

    /// Clear the update flag, first thing in the `TIM2` handler
    pub fn acknowledge() {
        pac::TIM2.sr().modify(|w| w.set_uif(false));
    }
}
