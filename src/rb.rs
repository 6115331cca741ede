use crate::{cancel::CancelToken, cursor::Cursor, error::Cancelled};
use crossbeam_utils::CachePadded;
use std::{
    iter,
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard},
    thread,
    time::Duration,
};

/// Default retry interval for blocking operations.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(1);

/// Everything the lock guards: the slots and both cursors. The full/empty
/// check and the cursor advance must be one atomic step, so no field is
/// touched outside the lock.
struct State<T> {
    slots: Box<[Option<T>]>,
    write: Cursor,
    read: Cursor,
}

impl<T> State<T> {
    /// Non-blocking insert transition.
    fn try_push(&mut self, item: T) -> Result<(), T> {
        let n = self.slots.len();
        // Writer a whole lap ahead: every slot holds an unread item.
        if self.write.index == self.read.index && self.write.lap != self.read.lap {
            return Err(item);
        }
        // Wrapping back to slot 0 is refused until the reader has claimed
        // slot 0; the writer must not lap a reader that never started.
        if self.write.step_wraps(n) && !self.read.started {
            return Err(item);
        }
        let at = self.write.step(n);
        self.slots[at] = Some(item);
        Ok(())
    }

    /// Non-blocking remove transition.
    fn try_pop(&mut self) -> Option<T> {
        // Coinciding cursors with equal laps mean empty, except right after
        // the very first insert: there only the started flags differ.
        if self.write.index == self.read.index
            && self.write.lap == self.read.lap
            && self.write.started == self.read.started
        {
            return None;
        }
        let at = self.read.step(self.slots.len());
        let item = self.slots[at].take();
        debug_assert!(item.is_some());
        item
    }

    /// Exact number of unread items.
    fn occupied(&self) -> usize {
        let n = self.slots.len();
        match (self.write.started, self.read.started) {
            (false, _) => 0,
            // First lap, reader not started: slots 0..=write.index are taken.
            (true, false) => self.write.index + 1,
            (true, true) => {
                if self.write.lap == self.read.lap {
                    self.write.index - self.read.index
                } else {
                    n + self.write.index - self.read.index
                }
            }
        }
    }
}

/// Fixed-capacity FIFO ring buffer with blocking, cancellable insert and
/// remove, safe to share between any number of producer and consumer threads.
///
/// A single mutex serializes the slot array and both cursors; it is held only
/// for the O(1) check-and-advance step, never across a wait. When an
/// operation cannot proceed (buffer full or empty) it sleeps for the backoff
/// interval outside the lock and retries.
///
/// ```
/// use lapring::RingBuffer;
/// use std::{sync::Arc, thread};
///
/// let rb = Arc::new(RingBuffer::<i32>::new(256));
/// thread::spawn({
///     let rb = rb.clone();
///     move || rb.push(123, None).unwrap()
/// })
/// .join()
/// .unwrap();
/// thread::spawn(move || assert_eq!(rb.pop(None).unwrap(), 123))
///     .join()
///     .unwrap();
/// ```
pub struct RingBuffer<T> {
    state: CachePadded<Mutex<State<T>>>,
    capacity: NonZeroUsize,
    backoff: Duration,
}

impl<T> RingBuffer<T> {
    /// Constructs an empty buffer with the given number of slots and the
    /// default backoff interval.
    ///
    /// *Capacity must be greater than zero.*
    pub fn new(capacity: usize) -> Self {
        Self::with_backoff(capacity, DEFAULT_BACKOFF)
    }

    /// Same as [`Self::new`] but with a custom retry interval for blocking
    /// operations.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_backoff(capacity: usize, backoff: Duration) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        Self {
            state: CachePadded::new(Mutex::new(State {
                slots: iter::repeat_with(|| None).take(capacity).collect(),
                write: Cursor::new(),
                read: Cursor::new(),
            })),
            capacity: unsafe { NonZeroUsize::new_unchecked(capacity) },
            backoff,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap()
    }

    /// Capacity of the buffer.
    ///
    /// It is constant during the whole buffer lifetime.
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Retry interval of blocking operations.
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// The number of items stored in the buffer.
    ///
    /// *The result may become stale at any time due to concurrent producer or
    /// consumer activity.*
    pub fn occupied_len(&self) -> usize {
        self.lock().occupied()
    }

    /// The number of remaining free slots in the buffer.
    ///
    /// *The result may become stale at any time due to concurrent producer or
    /// consumer activity.*
    pub fn vacant_len(&self) -> usize {
        self.capacity.get() - self.occupied_len()
    }

    /// Checks if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.occupied_len() == 0
    }

    /// Checks if the buffer is full.
    pub fn is_full(&self) -> bool {
        self.vacant_len() == 0
    }

    /// Appends an item to the buffer without blocking.
    ///
    /// If the insert cannot proceed, returns an `Err` containing the item
    /// that has not been appended. Besides a full buffer, the insert is also
    /// refused when its cursor would wrap back to slot 0 while no remove has
    /// ever happened: during the very first fill the writer may load every
    /// slot but must not start a second lap until the reader claims slot 0.
    pub fn try_push(&self, item: T) -> Result<(), T> {
        self.lock().try_push(item)
    }

    /// Removes the oldest item from the buffer without blocking.
    ///
    /// Returns `None` if the buffer is empty.
    pub fn try_pop(&self) -> Option<T> {
        self.lock().try_pop()
    }

    /// Appends an item to the buffer, waiting while it is full.
    ///
    /// Each failed attempt sleeps for the backoff interval outside the lock
    /// and retries. With `cancel: None` the call retries indefinitely;
    /// otherwise it stops once the token fires and hands the item back
    /// alongside [`Cancelled`]. The attempt is made before the token is
    /// consulted, so a push that can proceed immediately succeeds even on a
    /// fired token. Cancellation may lag the token by up to one backoff
    /// interval.
    pub fn push(&self, mut item: T, cancel: Option<&CancelToken>) -> Result<(), (Cancelled, T)> {
        loop {
            match self.try_push(item) {
                Ok(()) => return Ok(()),
                Err(rejected) => item = rejected,
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err((Cancelled, item));
            }
            thread::sleep(self.backoff);
        }
    }

    /// Removes the oldest item from the buffer, waiting while it is empty.
    ///
    /// Same retry and cancellation protocol as [`Self::push`]. Items are
    /// returned in exactly the order they were accepted, across any number of
    /// concurrent producers and consumers.
    pub fn pop(&self, cancel: Option<&CancelToken>) -> Result<T, Cancelled> {
        loop {
            if let Some(item) = self.try_pop() {
                return Ok(item);
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(Cancelled);
            }
            thread::sleep(self.backoff);
        }
    }
}
