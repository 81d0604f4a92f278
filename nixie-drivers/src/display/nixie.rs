//! Nixie tube display
//!
//! Four tubes behind a chain of shift registers feeding BCD decoders. A
//! frame is 16 bits: the hours byte then the minutes byte, each packed BCD
//! (one nibble per tube), shifted most significant bit first.
//!
//! ```text
//! LATCH ‾‾\___________________________________________/‾‾‾
//! CLOCK ______/‾\__/‾\__ ... __/‾\__/‾\__ ... __/‾\_______
//! DATA       h7    h6          h0    m7           m0
//! ```
//!
//! Brightness is set through the tube supply's PWM channel.

use nixie_core::traits::TimeDisplay;
use nixie_hal::{OutputPin, PwmOutput};

/// Shift-register driven nixie display
pub struct NixieDisplay<P, PWM> {
    data: P,
    clock: P,
    latch: P,
    pwm: PWM,
    /// Pair currently on the tubes, `None` until the first frame
    last: Option<(u8, u8)>,
    brightness: u8,
}

impl<P, PWM> NixieDisplay<P, PWM>
where
    P: OutputPin,
    PWM: PwmOutput,
{
    /// Create the display driver
    ///
    /// Leaves the latch closed and the clock idle, and programs the PWM
    /// output for `brightness`. Nothing is shifted until the first
    /// [`TimeDisplay::update`].
    pub fn new(data: P, clock: P, latch: P, pwm: PWM, brightness: u8) -> Self {
        let mut display = Self {
            data,
            clock,
            latch,
            pwm,
            last: None,
            brightness,
        };
        display.latch.set_high();
        display.clock.set_low();
        display.data.set_low();
        display.apply_brightness();
        display
    }

    /// Pair last shifted out
    pub fn shown(&self) -> Option<(u8, u8)> {
        self.last
    }

    fn shift_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            self.clock.set_low();
            self.data.set_state((byte >> bit) & 1 != 0);
            self.clock.set_high();
        }
    }

    fn apply_brightness(&mut self) {
        let max = u32::from(self.pwm.max_duty());
        let duty = u32::from(self.brightness) * max / u32::from(u8::MAX);
        self.pwm.set_duty(duty as u16);
    }
}

impl<P, PWM> TimeDisplay for NixieDisplay<P, PWM>
where
    P: OutputPin,
    PWM: PwmOutput,
{
    fn update(&mut self, hours: u8, minutes: u8) {
        if self.last == Some((hours, minutes)) {
            return;
        }

        self.latch.set_low();
        self.shift_byte(hours);
        self.shift_byte(minutes);
        self.clock.set_low();
        self.latch.set_high();

        self.last = Some((hours, minutes));
    }

    fn modify_brightness<F>(&mut self, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        self.brightness = f(self.brightness);
        self.apply_brightness();
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Data,
        Clock,
        Latch,
    }

    type Trace = Rc<RefCell<Vec<(Line, bool)>>>;

    /// Mock GPIO pin recording every level change into a shared trace
    struct MockPin {
        line: Line,
        high: bool,
        trace: Trace,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.trace.borrow_mut().push((self.line, true));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.trace.borrow_mut().push((self.line, false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockPwm {
        duty: u16,
    }

    impl PwmOutput for MockPwm {
        fn max_duty(&self) -> u16 {
            1000
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    fn display(brightness: u8) -> (NixieDisplay<MockPin, MockPwm>, Trace) {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let pin = |line| MockPin {
            line,
            high: false,
            trace: trace.clone(),
        };
        let display = NixieDisplay::new(
            pin(Line::Data),
            pin(Line::Clock),
            pin(Line::Latch),
            MockPwm { duty: 0 },
            brightness,
        );
        trace.borrow_mut().clear();
        (display, trace)
    }

    /// Bits sampled by the shift register on each rising clock edge
    fn sampled_bits(trace: &[(Line, bool)]) -> Vec<bool> {
        let mut data = false;
        let mut bits = Vec::new();
        for &(line, high) in trace {
            match line {
                Line::Data => data = high,
                Line::Clock if high => bits.push(data),
                _ => {}
            }
        }
        bits
    }

    fn bits_of(bytes: &[u8]) -> Vec<bool> {
        bytes
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |bit| (byte >> bit) & 1 != 0))
            .collect()
    }

    #[test]
    fn test_frame_hours_then_minutes_msb_first() {
        let (mut display, trace) = display(0);
        display.update(0x13, 0x39);

        let trace = trace.borrow();
        assert_eq!(sampled_bits(&trace), bits_of(&[0x13, 0x39]));
        assert_eq!(display.shown(), Some((0x13, 0x39)));
    }

    #[test]
    fn test_latch_frames_the_bits() {
        let (mut display, trace) = display(0);
        display.update(0x09, 0x41);

        let trace = trace.borrow();
        assert_eq!(trace.first(), Some(&(Line::Latch, false)));
        assert_eq!(trace.last(), Some(&(Line::Latch, true)));
        let latch_edges = trace.iter().filter(|(line, _)| *line == Line::Latch).count();
        assert_eq!(latch_edges, 2);
        let rising_clocks = trace.iter().filter(|&&entry| entry == (Line::Clock, true)).count();
        assert_eq!(rising_clocks, 16);
    }

    #[test]
    fn test_first_update_always_shifts() {
        let (mut display, trace) = display(0);
        display.update(0x00, 0x00);
        assert!(!trace.borrow().is_empty());
    }

    #[test]
    fn test_unchanged_pair_is_silent() {
        let (mut display, trace) = display(0);
        display.update(0x12, 0x34);
        trace.borrow_mut().clear();

        display.update(0x12, 0x34);
        assert!(trace.borrow().is_empty());

        display.update(0x12, 0x35);
        assert_eq!(sampled_bits(&trace.borrow()), bits_of(&[0x12, 0x35]));
    }

    #[test]
    fn test_brightness_scales_to_duty() {
        let (mut display, _trace) = display(255);
        assert_eq!(display.pwm.duty, 1000);

        display.modify_brightness(|_| 0);
        assert_eq!(display.brightness(), 0);
        assert_eq!(display.pwm.duty, 0);

        display.modify_brightness(|b| b.saturating_add(51));
        assert_eq!(display.brightness(), 51);
        assert_eq!(display.pwm.duty, 200);
    }

    #[test]
    fn test_brightness_leaves_tubes_alone() {
        let (mut display, trace) = display(100);
        display.modify_brightness(|b| b / 2);
        assert!(trace.borrow().is_empty());
    }

    proptest! {
        #[test]
        fn prop_repeat_update_idempotent(hours in any::<u8>(), minutes in any::<u8>()) {
            let (mut display, trace) = display(0);
            display.update(hours, minutes);
            let once = trace.borrow().len();
            display.update(hours, minutes);
            prop_assert_eq!(trace.borrow().len(), once);
            prop_assert_eq!(sampled_bits(&trace.borrow()), bits_of(&[hours, minutes]));
        }
    }
}
