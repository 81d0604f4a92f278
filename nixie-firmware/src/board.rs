//! Blue Pill board definition
//!
//! Pin map:
//!
//! | Signal              | Pin  | Peripheral  |
//! |---------------------|------|-------------|
//! | RTC SCL             | PB6  | I2C1        |
//! | RTC SDA             | PB7  | I2C1        |
//! | RTC SQW (1 Hz)      | PA0  | EXTI0       |
//! | Shift data          | PB12 | GPIO        |
//! | Shift clock         | PB13 | GPIO        |
//! | Shift latch         | PB14 | GPIO        |
//! | Tube supply PWM     | PA6  | TIM3 CH1    |
//!
//! The chip runs from the reset HSI clock: SYSCLK, APB1 and the APB1 timer
//! clock are all 8 MHz.

use embassy_stm32::time::Hertz;
use nixie_core::config::ClockConfig;
use nixie_hal::TwiConfig;

/// APB1 clock feeding I2C1
pub const PCLK1_HZ: u32 = 8_000_000;

/// APB1 timer kernel clock (TIM2, TIM3)
pub const TIMER_CLOCK_HZ: u32 = 8_000_000;

/// Clock chip on the bus
pub const CLOCK: ClockConfig = ClockConfig::DS1307;

/// Bus speed; the DS1307 is a standard-mode part
pub const TWI: TwiConfig = TwiConfig::STANDARD;

/// Watchdog service tick
pub const TICK_PERIOD_MS: u16 = 500;

/// Independent watchdog timeout
pub const WATCHDOG_TIMEOUT_US: u32 = 2_000_000;

/// Watchdog ticks without a completed read before the watchdog is starved
///
/// The square wave asks for a read every second, so this allows a few
/// dropped triggers before the board resets.
pub const STALL_TICKS: u16 = 10;

/// Tube supply PWM frequency
pub const PWM_FREQUENCY: Hertz = Hertz(20_000);

/// Brightness level at power-up
pub const INITIAL_BRIGHTNESS: u8 = 192;
