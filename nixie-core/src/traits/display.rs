//! Time display trait

/// Numeric display showing hours and minutes
///
/// Foreground only: the main loop is the single caller, never an
/// interrupt handler.
pub trait TimeDisplay {
    /// Show `hours` and `minutes` (packed BCD, as read from the clock)
    ///
    /// Implementations skip the output entirely when the pair is unchanged
    /// from the previous call.
    fn update(&mut self, hours: u8, minutes: u8);

    /// Apply `f` to the brightness level and reprogram the output
    fn modify_brightness<F>(&mut self, f: F)
    where
        F: FnOnce(u8) -> u8;

    /// Current brightness level
    fn brightness(&self) -> u8;
}
