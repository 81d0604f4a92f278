//! Nixie - Real-Time-Clock Numeric Display Firmware
//!
//! Main firmware binary for STM32F103-based nixie clocks.
//!
//! Every bus transaction with the clock chip runs from the I2C event
//! interrupt; the chip's 1 Hz square wave asks for a fresh read each
//! second. The idle loop only moves finished readings to the tubes and
//! services the watchdog.
//!
//! ```text
//! EXTI0 (1 Hz) ──► read_async ──► I2C1_EV ... I2C1_EV ──► time_changed
//! TIM2 ──────────────────────────────────────────────────► watchdog_due
//!                                                              │
//!                                          idle loop ◄─────────┘
//! ```

#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m_rt::entry;
use defmt::*;
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::InterruptExt;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use irq::{handler, scope, scoped_interrupts};
use {defmt_rtt as _, panic_probe as _};

use nixie_core::rtc::ClockProtocol;
use nixie_core::state::{Flags, MainLoop};
use nixie_drivers::display::NixieDisplay;
use nixie_hal_stm32f1::{Iwdg, Pin, PwmChannel, SquareWaveTrigger, TickTimer, TwiV1};

mod board;

scoped_interrupts! {
    enum Interrupt {
        I2C1_EV,
        EXTI0,
        TIM2,
    }

    use #[interrupt];
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Nixie clock starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Shared with the interrupt handlers for the lifetime of `main`
    let flags = Flags::new();
    let twi = TwiV1::new(p.I2C1, p.PB6, p.PB7, board::TWI, board::PCLK1_HZ);
    let clock: Mutex<CriticalSectionRawMutex, _> =
        Mutex::new(RefCell::new(ClockProtocol::new(twi, board::CLOCK)));

    // Display
    let pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new(p.PA6, OutputType::PushPull)),
        None,
        None,
        None,
        board::PWM_FREQUENCY,
        CountingMode::EdgeAlignedUp,
    );
    let mut supply = pwm.split().ch1;
    supply.enable();
    let display = NixieDisplay::new(
        Pin::new(Output::new(p.PB12, Level::Low, Speed::Low), false),
        Pin::new(Output::new(p.PB13, Level::Low, Speed::Low), false),
        Pin::new(Output::new(p.PB14, Level::High, Speed::Low), true),
        PwmChannel::new(supply),
        board::INITIAL_BRIGHTNESS,
    );

    // Interrupt sources, still masked in the NVIC
    let _trigger = SquareWaveTrigger::new(p.PA0, p.EXTI0);
    let _tick = TickTimer::start(p.TIM2, board::TIMER_CLOCK_HZ, board::TICK_PERIOD_MS);

    let watchdog = Iwdg::start(p.IWDG, board::WATCHDOG_TIMEOUT_US);
    let mut main_loop = MainLoop::new(display, watchdog, board::STALL_TICKS);
    info!(
        "Watchdog running: {}us timeout, tick {}ms",
        board::WATCHDOG_TIMEOUT_US,
        board::TICK_PERIOD_MS
    );

    handler!(bus_event = || {
        let outcome =
            clock.lock(|clock| clock.borrow_mut().on_bus_event(&flags.time_changed));
        if let Some(outcome) = outcome {
            if outcome.repair.needs_write() {
                warn!("Clock registers repaired: {}", outcome.repair);
            }
        }
    });

    handler!(square_wave = || {
        SquareWaveTrigger::acknowledge();
        if let Err(e) = clock.lock(|clock| clock.borrow_mut().read_async()) {
            trace!("Read trigger dropped: {}", e);
        }
    });

    handler!(tick = || {
        TickTimer::acknowledge();
        flags.watchdog_due.raise();
    });

    scope(|scope| {
        scope.register(Interrupt::I2C1_EV, bus_event);
        scope.register(Interrupt::EXTI0, square_wave);
        scope.register(Interrupt::TIM2, tick);

        // SAFETY: every unmasked vector has a handler registered above, and
        // the handlers only touch state behind the mutex or atomics.
        unsafe {
            interrupt::I2C1_EV.enable();
            interrupt::EXTI0.enable();
            interrupt::TIM2.enable();
        }

        // A halted chip never starts its square wave, so the first read
        // (which restarts it) can't wait for a trigger.
        if let Err(e) = clock.lock(|clock| clock.borrow_mut().read_async()) {
            warn!("Boot read not started: {}", e);
        }
        info!("Running");

        loop {
            let serviced = main_loop.poll(&flags, || {
                clock.lock(|clock| clock.borrow().registers().hours_minutes())
            });

            if serviced.time.is_some() {
                let time = clock.lock(|clock| clock.borrow().registers().time());
                debug!("Time {}", time);
            }
            if serviced.starved {
                error!("No time from the clock, leaving the watchdog to expire");
            }

            // Sleep unless an interrupt raised a flag since the poll
            cortex_m::interrupt::free(|_| {
                if !flags.time_changed.is_set() && !flags.watchdog_due.is_set() {
                    cortex_m::asm::wfi();
                }
            });
        }
    })
}
