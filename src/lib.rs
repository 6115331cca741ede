//! Fixed-capacity MPMC FIFO ring buffer built on a single mutex.
//!
//! Full and empty are told apart by lap parity: each cursor carries a flag
//! that flips on wraparound, so coinciding indices mean empty when the laps
//! agree and full when they differ. Blocking operations retry on a fixed
//! sleep interval and may be cancelled through a [`CancelToken`].

pub mod cancel;
pub mod error;
pub mod rb;

mod cursor;

pub use cancel::CancelToken;
pub use error::Cancelled;
pub use rb::RingBuffer;

#[cfg(test)]
mod tests;
