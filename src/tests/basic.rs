use crate::RingBuffer;

#[test]
fn capacity() {
    const CAP: usize = 13;
    let rb = RingBuffer::<i32>::new(CAP);
    assert_eq!(rb.capacity().get(), CAP);
}

#[test]
#[should_panic]
fn zero_capacity() {
    let _ = RingBuffer::<i32>::new(0);
}

#[test]
fn fifo_in_bounds() {
    let rb = RingBuffer::<i32>::new(100);
    for i in 0..10 {
        assert_eq!(rb.try_push(i), Ok(()));
    }
    for i in 0..10 {
        assert_eq!(rb.try_pop(), Some(i));
    }
    assert_eq!(rb.try_pop(), None);
}

#[test]
fn wraparound() {
    const CAP: usize = 10;
    let rb = RingBuffer::<usize>::new(CAP);
    // Two full cycles: the second one exercises the lap flip on both cursors.
    for _ in 0..2 {
        for i in 0..CAP {
            assert_eq!(rb.try_push(i), Ok(()));
        }
        for i in 0..CAP {
            assert_eq!(rb.try_pop(), Some(i));
        }
        assert_eq!(rb.try_pop(), None);
    }
}

#[test]
fn single_item_visible() {
    let rb = RingBuffer::<i32>::new(4);
    assert_eq!(rb.try_push(7), Ok(()));
    assert_eq!(rb.occupied_len(), 1);
    assert_eq!(rb.try_pop(), Some(7));
    assert_eq!(rb.try_pop(), None);
    assert!(rb.is_empty());
}

#[test]
fn first_fill_boundary() {
    const CAP: usize = 10;
    let rb = RingBuffer::<usize>::new(CAP);
    // The first fill loads every slot...
    for i in 0..CAP {
        assert_eq!(rb.try_push(i), Ok(()));
    }
    assert!(rb.is_full());
    // ...but the writer may not wrap to slot 0 before the first remove.
    assert_eq!(rb.try_push(CAP), Err(CAP));
    assert_eq!(rb.occupied_len(), CAP);

    assert_eq!(rb.try_pop(), Some(0));
    assert_eq!(rb.try_push(CAP), Ok(()));
    assert!(rb.is_full());
    for i in 1..=CAP {
        assert_eq!(rb.try_pop(), Some(i));
    }
    assert_eq!(rb.try_pop(), None);
}

#[test]
fn capacity_one() {
    let rb = RingBuffer::<u8>::new(1);
    for i in 0..5 {
        assert_eq!(rb.try_push(i), Ok(()));
        assert_eq!(rb.try_push(100), Err(100));
        assert_eq!(rb.try_pop(), Some(i));
        assert_eq!(rb.try_pop(), None);
    }
}

#[test]
fn len_accounting() {
    let rb = RingBuffer::<i32>::new(2);

    assert_eq!(rb.occupied_len(), 0);
    assert_eq!(rb.vacant_len(), 2);

    assert_eq!(rb.try_push(123), Ok(()));
    assert_eq!(rb.occupied_len(), 1);
    assert_eq!(rb.vacant_len(), 1);

    assert_eq!(rb.try_push(456), Ok(()));
    assert_eq!(rb.occupied_len(), 2);
    assert_eq!(rb.vacant_len(), 0);
    assert!(rb.is_full());

    assert_eq!(rb.try_pop(), Some(123));
    assert_eq!(rb.occupied_len(), 1);

    assert_eq!(rb.try_pop(), Some(456));
    assert_eq!(rb.occupied_len(), 0);
    assert!(rb.is_empty());

    assert_eq!(rb.try_push(789), Ok(()));
    assert_eq!(rb.occupied_len(), 1);
    assert_eq!(rb.vacant_len(), 1);
}

#[test]
fn len_accounting_across_laps() {
    const CAP: usize = 4;
    let rb = RingBuffer::<usize>::new(CAP);
    for i in 0..CAP {
        rb.try_push(i).unwrap();
    }
    rb.try_pop().unwrap();
    rb.try_pop().unwrap();
    // Writer wraps onto the second lap while the reader stays on the first.
    rb.try_push(CAP).unwrap();
    rb.try_push(CAP + 1).unwrap();
    assert_eq!(rb.occupied_len(), CAP);
    assert!(rb.is_full());
    for i in 2..CAP + 2 {
        assert_eq!(rb.try_pop(), Some(i));
    }
    assert!(rb.is_empty());
}

#[test]
fn drops_unread_items() {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct Counted(Arc<AtomicUsize>);
    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    let drops = Arc::new(AtomicUsize::new(0));
    let rb = RingBuffer::new(8);
    for _ in 0..5 {
        assert!(rb.try_push(Counted(drops.clone())).is_ok());
    }
    drop(rb.try_pop());
    assert_eq!(drops.load(Ordering::Relaxed), 1);
    drop(rb);
    assert_eq!(drops.load(Ordering::Relaxed), 5);
}
