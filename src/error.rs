use std::{error::Error, fmt};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// Blocking operation error: the cancel token fired before the operation
/// could complete.
///
/// A cancelled [`push`](crate::RingBuffer::push) hands the rejected item back
/// alongside this error; a cancelled [`pop`](crate::RingBuffer::pop) returns
/// nothing. In both cases the buffer state is untouched.
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl Error for Cancelled {}
