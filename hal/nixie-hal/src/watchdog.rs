//! Hardware watchdog abstraction

/// A running hardware watchdog
///
/// Once started it can only be fed; if it is not fed within its timeout the
/// whole system resets.
pub trait Watchdog {
    /// Reload the watchdog counter
    fn feed(&mut self);
}
