//! Bus transaction engine
//!
//! The engine owns the two-wire controller and runs a private state machine
//! from its completion interrupt. Every request is non-blocking: it claims
//! the bus, programs one hardware step and returns. Each completion event
//! then advances exactly one unit of work (one byte or one bus condition),
//! and when the requested step is done the engine hands back the
//! continuation tag the caller supplied.
//!
//! ```text
//!            start_async          send_async           recv_async
//!  Idle ──────────────► Command   ──────────► Sending  ──────────► Receiving
//!   ▲                      │                     │ (byte left?)        │ (byte left?)
//!   │                      │                     ▼ write next          ▼ read next
//!   └──────────────────────┴──── completion ─────┴─────────────────────┘
//!                  continuation taken, phase = Idle, busy = false
//! ```
//!
//! Continuations are a closed `Copy` tag type chosen by the client (see
//! [`crate::rtc::Step`]). [`BusEngine::interrupt`] returns the tag only after
//! the engine is idle again, so the client can chain the next request
//! straight from its dispatch.

use heapless::Vec;
use nixie_hal::TwiController;

/// Largest transfer the engine stages (one clock register block)
pub const MAX_TRANSFER: usize = 8;

/// Kind of hardware step currently in flight
///
/// Governs how the next completion interrupt is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No transaction in flight
    Idle,
    /// A start (or repeated start) condition was issued
    Command,
    /// Bytes are being shifted out
    Sending,
    /// Bytes are being clocked in
    Receiving,
}

/// Reasons a bus request is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Another transaction is in flight; the request is dropped, not queued
    Busy,
    /// Transfer longer than [`MAX_TRANSFER`]
    Overlong,
}

/// Single-transaction asynchronous bus engine
///
/// `K` is the continuation tag returned from [`interrupt`](Self::interrupt)
/// when a requested step completes.
pub struct BusEngine<T, K> {
    twi: T,
    /// True from a successful request until its completion interrupt
    busy: bool,
    phase: Phase,
    continuation: Option<K>,
    /// Staged bytes for the current send, or bytes received so far
    buffer: Vec<u8, MAX_TRANSFER>,
    /// Next byte of `buffer` to shift out while sending
    cursor: usize,
    /// Total byte count of the current receive
    expected: usize,
}

impl<T, K> BusEngine<T, K>
where
    T: TwiController,
    K: Copy,
{
    /// Create an idle engine around a configured controller
    pub const fn new(twi: T) -> Self {
        Self {
            twi,
            busy: false,
            phase: Phase::Idle,
            continuation: None,
            buffer: Vec::new(),
            cursor: 0,
            expected: 0,
        }
    }

    /// Check if a transaction is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Bytes collected by the last completed receive
    ///
    /// Valid from the receive's continuation until the next send or
    /// receive request.
    pub fn received(&self) -> &[u8] {
        &self.buffer
    }

    /// Borrow the underlying controller
    pub fn controller(&self) -> &T {
        &self.twi
    }

    /// Mutably borrow the underlying controller
    pub fn controller_mut(&mut self) -> &mut T {
        &mut self.twi
    }

    /// Request a start condition
    ///
    /// The continuation is returned by the completion interrupt that follows.
    pub fn start_async(&mut self, continuation: K) -> Result<(), BusError> {
        self.enter(Phase::Command, continuation)?;
        self.twi.start();
        Ok(())
    }

    /// Request transmission of `data`
    ///
    /// An empty `data` succeeds immediately without touching the bus and
    /// its continuation is never returned; the caller treats it as done.
    pub fn send_async(&mut self, data: &[u8], continuation: K) -> Result<(), BusError> {
        let Some(&first) = data.first() else {
            return Ok(());
        };
        if data.len() > MAX_TRANSFER {
            return Err(BusError::Overlong);
        }
        self.enter(Phase::Sending, continuation)?;

        self.buffer.clear();
        // Length checked above
        let _ = self.buffer.extend_from_slice(data);
        self.cursor = 1;
        self.twi.write(first);
        Ok(())
    }

    /// Request reception of `count` bytes
    ///
    /// Every byte but the last is acknowledged. The bytes are available from
    /// [`received`](Self::received) once the continuation comes back. A zero
    /// count behaves like an empty [`send_async`](Self::send_async).
    pub fn recv_async(&mut self, count: usize, continuation: K) -> Result<(), BusError> {
        if count == 0 {
            return Ok(());
        }
        if count > MAX_TRANSFER {
            return Err(BusError::Overlong);
        }
        self.enter(Phase::Receiving, continuation)?;

        self.buffer.clear();
        self.expected = count;
        self.twi.read(count > 1);
        Ok(())
    }

    /// Request a stop condition
    ///
    /// Only valid between transactions, i.e. from a continuation after the
    /// engine has gone idle. No completion interrupt follows.
    pub fn stop_async(&mut self) -> Result<(), BusError> {
        if self.busy {
            return Err(BusError::Busy);
        }
        self.twi.stop();
        Ok(())
    }

    /// Advance the transaction from the bus-completion interrupt
    ///
    /// Returns the continuation once the requested step is complete, or
    /// `None` while bytes of a send or receive remain. Entries the
    /// controller doesn't acknowledge as the awaited event are ignored.
    ///
    /// # Panics
    ///
    /// A completion event with no transaction in flight means hardware and
    /// software state have diverged; the engine halts instead of corrupting
    /// whichever transaction comes next.
    pub fn interrupt(&mut self) -> Option<K> {
        if !self.busy {
            panic!("bus completion event with no transaction in flight");
        }
        if !self.twi.acknowledge() {
            return None;
        }

        match self.phase {
            Phase::Sending => {
                if let Some(&byte) = self.buffer.get(self.cursor) {
                    self.cursor += 1;
                    self.twi.write(byte);
                    return None;
                }
            }
            Phase::Receiving => {
                let byte = self.twi.data();
                // `expected` never exceeds the buffer capacity
                let _ = self.buffer.push(byte);
                let remaining = self.expected.saturating_sub(self.buffer.len());
                if remaining > 0 {
                    self.twi.read(remaining > 1);
                    return None;
                }
            }
            Phase::Command | Phase::Idle => {}
        }

        self.complete()
    }

    /// Claim the bus for a new step
    fn enter(&mut self, phase: Phase, continuation: K) -> Result<(), BusError> {
        // Claimed from the foreground and from continuations running in
        // interrupt context; the test-and-set must not be split.
        let claimed = critical_section::with(|_| {
            if self.busy {
                false
            } else {
                self.busy = true;
                true
            }
        });
        if !claimed {
            return Err(BusError::Busy);
        }

        self.phase = phase;
        self.continuation = Some(continuation);
        Ok(())
    }

    /// Finish the current step and release the bus
    fn complete(&mut self) -> Option<K> {
        let continuation = self.continuation.take();
        self.phase = Phase::Idle;
        self.busy = false;
        continuation
    }
}
