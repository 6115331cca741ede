//! Channel-backed twin of [`lapring::RingBuffer`], kept for comparison.
//!
//! It does the same job as the ring buffer at comparable cost: a bounded
//! [`crossbeam_channel`] under the identical two-operation contract, with the
//! same cancellation types. Either backend can stand in for the other.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use lapring::{CancelToken, Cancelled};
use std::{num::NonZeroUsize, time::Duration};

pub use lapring::rb::DEFAULT_BACKOFF;

/// Bounded-channel buffer exposing the same operations as
/// [`lapring::RingBuffer`].
///
/// Both channel ends are owned here, so the buffer is shared by reference
/// (or `Arc`) among any number of producers and consumers, exactly like the
/// ring buffer.
pub struct ChanBuffer<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    capacity: NonZeroUsize,
    backoff: Duration,
}

impl<T> ChanBuffer<T> {
    /// Constructs an empty buffer with the given number of slots.
    ///
    /// *Capacity must be greater than zero.*
    pub fn new(capacity: usize) -> Self {
        Self::with_backoff(capacity, DEFAULT_BACKOFF)
    }

    /// Same as [`Self::new`] but with a custom bound on how long a blocked
    /// operation waits between cancellation checks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (a zero-capacity channel would rendezvous
    /// instead of buffering).
    pub fn with_backoff(capacity: usize, backoff: Duration) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        let (tx, rx) = bounded(capacity);
        Self {
            tx,
            rx,
            capacity: unsafe { NonZeroUsize::new_unchecked(capacity) },
            backoff,
        }
    }

    /// Capacity of the buffer.
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// The number of items stored in the buffer.
    pub fn occupied_len(&self) -> usize {
        self.rx.len()
    }

    /// The number of remaining free slots in the buffer.
    pub fn vacant_len(&self) -> usize {
        self.capacity.get() - self.occupied_len()
    }

    /// Checks if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Checks if the buffer is full.
    pub fn is_full(&self) -> bool {
        self.rx.is_full()
    }

    /// Appends an item to the buffer without blocking.
    ///
    /// If the buffer is full, returns an `Err` containing the item that has
    /// not been appended.
    pub fn try_push(&self, item: T) -> Result<(), T> {
        self.tx.try_send(item).map_err(|e| e.into_inner())
    }

    /// Removes the oldest item from the buffer without blocking.
    ///
    /// Returns `None` if the buffer is empty.
    pub fn try_pop(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Appends an item to the buffer, waiting while it is full.
    ///
    /// The wait runs in backoff-sized slices so a fired token is noticed
    /// within one interval, matching the ring buffer's cancellation latency.
    pub fn push(&self, mut item: T, cancel: Option<&CancelToken>) -> Result<(), (Cancelled, T)> {
        loop {
            match self.tx.send_timeout(item, self.backoff) {
                Ok(()) => return Ok(()),
                Err(SendTimeoutError::Timeout(rejected))
                | Err(SendTimeoutError::Disconnected(rejected)) => item = rejected,
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err((Cancelled, item));
            }
        }
    }

    /// Removes the oldest item from the buffer, waiting while it is empty.
    pub fn pop(&self, cancel: Option<&CancelToken>) -> Result<T, Cancelled> {
        loop {
            match self.rx.recv_timeout(self.backoff) {
                Ok(item) => return Ok(item),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(Cancelled);
            }
        }
    }
}
