//! Foreground idle loop
//!
//! The loop owns everything that never runs in interrupt context: the
//! display and the watchdog. Each [`MainLoop::poll`] pass consumes the
//! pending flags.
//!
//! The watchdog is the only recovery from a bus transaction that never
//! completes. Since the foreground itself never blocks on the bus, the loop
//! stops feeding the watchdog once `stall_ticks` watchdog ticks pass without
//! fresh time, which turns a hung transaction into a system reset.

use nixie_hal::Watchdog;

use crate::traits::TimeDisplay;

use super::flags::Flags;

/// What a single poll pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Serviced {
    /// Hours and minutes pushed to the display
    pub time: Option<(u8, u8)>,
    /// The watchdog was fed
    pub watchdog_fed: bool,
    /// A watchdog tick was left unserviced because the clock went quiet
    pub starved: bool,
}

/// Foreground loop state
pub struct MainLoop<D, W> {
    display: D,
    watchdog: W,
    /// Watchdog ticks tolerated without fresh time
    stall_ticks: u16,
    ticks_since_time: u16,
}

impl<D, W> MainLoop<D, W>
where
    D: TimeDisplay,
    W: Watchdog,
{
    /// Create the loop
    ///
    /// # Arguments
    /// - `display`: Display driver, owned by the foreground
    /// - `watchdog`: Started hardware watchdog
    /// - `stall_ticks`: Watchdog ticks without a completed read before the
    ///   watchdog is left to expire
    pub fn new(display: D, watchdog: W, stall_ticks: u16) -> Self {
        Self {
            display,
            watchdog,
            stall_ticks,
            ticks_since_time: 0,
        }
    }

    /// Borrow the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutably borrow the display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Run one pass of the idle loop
    ///
    /// `read_time` is called only when fresh time is pending and must return
    /// the (hours, minutes) pair from the register block. The time flag is
    /// cleared after the display has been updated.
    pub fn poll<F>(&mut self, flags: &Flags, read_time: F) -> Serviced
    where
        F: FnOnce() -> (u8, u8),
    {
        let mut serviced = Serviced::default();

        if let Some(ticket) = flags.time_changed.pending() {
            let (hours, minutes) = read_time();
            self.display.update(hours, minutes);
            flags.time_changed.clear(ticket);

            self.ticks_since_time = 0;
            serviced.time = Some((hours, minutes));
        }

        if let Some(ticket) = flags.watchdog_due.pending() {
            flags.watchdog_due.clear(ticket);

            if self.ticks_since_time < self.stall_ticks {
                self.ticks_since_time += 1;
                self.watchdog.feed();
                serviced.watchdog_fed = true;
            } else {
                serviced.starved = true;
            }
        }

        serviced
    }
}
