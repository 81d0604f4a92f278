//! Level-triggered event flags
//!
//! A flag is set from interrupt context and cleared by the foreground loop
//! once it has consumed the event. Clearing uses the [`Ticket`] handed out
//! when the flag was observed, so a raise that lands between the
//! foreground's read and its clear is still pending on the next pass.

use portable_atomic::{AtomicU8, Ordering};

/// Proof that a flag was observed set, used to clear exactly that much
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ticket(u8);

/// Single-writer-per-side event flag
///
/// `raise` is the interrupt side, `pending`/`clear` the foreground side.
/// Raises are counted modulo 256; the flag only reads clear again if the
/// foreground falls a multiple of 256 raises behind.
pub struct EventFlag {
    raised: AtomicU8,
    cleared: AtomicU8,
}

impl Default for EventFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl EventFlag {
    /// Create a clear flag
    pub const fn new() -> Self {
        Self {
            raised: AtomicU8::new(0),
            cleared: AtomicU8::new(0),
        }
    }

    /// Set the flag
    pub fn raise(&self) {
        self.raised.fetch_add(1, Ordering::Release);
    }

    /// Check if the flag is set
    pub fn is_set(&self) -> bool {
        self.pending().is_some()
    }

    /// Observe the flag, returning a ticket if it is set
    pub fn pending(&self) -> Option<Ticket> {
        let raised = self.raised.load(Ordering::Acquire);
        if raised != self.cleared.load(Ordering::Relaxed) {
            Some(Ticket(raised))
        } else {
            None
        }
    }

    /// Clear the raises covered by `ticket`
    pub fn clear(&self, ticket: Ticket) {
        self.cleared.store(ticket.0, Ordering::Release);
    }
}

/// The system's interrupt-to-foreground signals
#[derive(Default)]
pub struct Flags {
    /// A read completed and the register block holds fresh time
    pub time_changed: EventFlag,
    /// The periodic timer asks for the watchdog to be serviced
    pub watchdog_due: EventFlag,
}

impl Flags {
    pub const fn new() -> Self {
        Self {
            time_changed: EventFlag::new(),
            watchdog_due: EventFlag::new(),
        }
    }
}
