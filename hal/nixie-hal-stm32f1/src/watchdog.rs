//! Independent watchdog

use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_stm32::Peri;
use nixie_hal::Watchdog;

/// Independent watchdog, running from the LSI oscillator
///
/// Once started it can't be stopped; only feeding it holds off the reset.
pub struct Iwdg<'d> {
    inner: IndependentWatchdog<'d, IWDG>,
}

impl<'d> Iwdg<'d> {
    /// Configure and start the watchdog
    pub fn start(peri: Peri<'d, IWDG>, timeout_us: u32) -> Self {
        let mut inner = IndependentWatchdog::new(peri, timeout_us);
        inner.unleash();
        Self { inner }
    }
}

impl Watchdog for Iwdg<'_> {
    fn feed(&mut self) {
        self.inner.pet();
    }
}
