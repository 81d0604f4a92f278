//! Two-wire controller for the STM32F1 I2C peripheral
//!
//! The F1 block (I2C v1) reports master-mode progress through event flags
//! in SR1. `I2C1_EV` is level-triggered: it stays asserted for as long as
//! any enabled flag is set.
//!
//! | Command  | Completion event                        |
//! |----------|-----------------------------------------|
//! | start    | SB (start condition generated)          |
//! | write    | ADDR (address sent) / BTF (byte done)   |
//! | read     | RXNE (byte received, needs `ITBUFEN`)   |
//!
//! SB is cleared by the SR1 read plus the address write that follows it,
//! ADDR by reading SR1 then SR2, RXNE by reading the data register. BTF is
//! cleared by the next data write, or only once a requested start or stop
//! has actually been generated on the bus. Until then the vector re-enters
//! with the old BTF; [`TwiController::acknowledge`] checks SR1 for the flag
//! the last command waits for and reports anything else as stale.
//!
//! `ITEVTEN` is set by `start` and cleared by `stop`, so nothing fires
//! between transactions. `ITBUFEN` stays off while transmitting so TXE
//! doesn't keep the interrupt asserted.
//!
//! Only I2C1 on PB6 (SCL) / PB7 (SDA) is supported.

use embassy_stm32::pac;
use embassy_stm32::pac::gpio::vals::{CnfOut, Mode};
use embassy_stm32::peripherals::{I2C1, PB6, PB7};
use embassy_stm32::Peri;
use nixie_hal::{TwiConfig, TwiController};

/// Status flag the last command completes with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Awaiting {
    Nothing,
    Start,
    Transmit,
    Receive,
}

/// I2C1 driven one event at a time
pub struct TwiV1<'d> {
    _peri: Peri<'d, I2C1>,
    _scl: Peri<'d, PB6>,
    _sda: Peri<'d, PB7>,
    awaiting: Awaiting,
}

impl<'d> TwiV1<'d> {
    /// Configure I2C1 as a bus master
    ///
    /// Event interrupts are enabled by the first start; the `I2C1_EV`
    /// vector itself is left masked in the NVIC.
    ///
    /// # Arguments
    /// - `pclk_hz`: APB1 clock feeding the peripheral, 2..=36 MHz
    pub fn new(
        peri: Peri<'d, I2C1>,
        scl: Peri<'d, PB6>,
        sda: Peri<'d, PB7>,
        config: TwiConfig,
        pclk_hz: u32,
    ) -> Self {
        pac::RCC.apb2enr().modify(|w| w.set_iopben(true));
        pac::RCC.apb1enr().modify(|w| w.set_i2c1en(true));

        // PB6/PB7: alternate function, open drain
        pac::GPIOB.cr(0).modify(|w| {
            for pin in [6, 7] {
                w.set_mode(pin, Mode::OUTPUT50MHZ);
                w.set_cnf_out(pin, CnfOut::ALTOPENDRAIN);
            }
        });

        let regs = pac::I2C1;
        regs.cr1().modify(|w| w.set_swrst(true));
        regs.cr1().modify(|w| w.set_swrst(false));

        let freq_mhz = (pclk_hz / 1_000_000) as u8;
        regs.cr2().write(|w| w.set_freq(freq_mhz));
        regs.ccr().write(|w| w.set_ccr(config.divider(pclk_hz)));
        // Standard mode: 1000 ns maximum rise time
        regs.trise().write(|w| w.set_trise(freq_mhz + 1));
        regs.cr1().modify(|w| w.set_pe(true));

        Self {
            _peri: peri,
            _scl: scl,
            _sda: sda,
            awaiting: Awaiting::Nothing,
        }
    }
}

impl TwiController for TwiV1<'_> {
    fn start(&mut self) {
        let regs = pac::I2C1;
        self.awaiting = Awaiting::Start;
        regs.cr1().modify(|w| w.set_start(true));
        regs.cr2().modify(|w| w.set_itevten(true));
    }

    fn write(&mut self, byte: u8) {
        let regs = pac::I2C1;
        self.awaiting = Awaiting::Transmit;
        regs.cr2().modify(|w| w.set_itbufen(false));
        regs.dr().write(|w| w.set_dr(byte));
    }

    fn read(&mut self, ack: bool) {
        let regs = pac::I2C1;
        self.awaiting = Awaiting::Receive;
        regs.cr1().modify(|w| w.set_ack(ack));
        regs.cr2().modify(|w| w.set_itbufen(true));
    }

    fn data(&mut self) -> u8 {
        pac::I2C1.dr().read().dr()
    }

    fn stop(&mut self) {
        let regs = pac::I2C1;
        self.awaiting = Awaiting::Nothing;
        regs.cr2().modify(|w| {
            w.set_itevten(false);
            w.set_itbufen(false);
        });
        regs.cr1().modify(|w| w.set_stop(true));
    }

    fn acknowledge(&mut self) -> bool {
        let regs = pac::I2C1;
        let sr1 = regs.sr1().read();
        match self.awaiting {
            Awaiting::Start => sr1.sb(),
            Awaiting::Transmit if sr1.addr() => {
                // SR1 then SR2 clears ADDR
                let _ = regs.sr2().read();
                true
            }
            Awaiting::Transmit => sr1.btf(),
            Awaiting::Receive => sr1.rxne(),
            Awaiting::Nothing => false,
        }
    }
}
