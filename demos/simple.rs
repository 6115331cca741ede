use lapring::RingBuffer;

fn main() {
    let rb = RingBuffer::<u32>::new(3);

    // The first fill loads every slot.
    rb.try_push(10).unwrap();
    rb.try_push(20).unwrap();
    rb.try_push(30).unwrap();
    assert!(rb.is_full());

    // A fourth insert would wrap to slot 0 before any remove: refused.
    assert_eq!(rb.try_push(40), Err(40));

    // After the first remove the wrap is open.
    assert_eq!(rb.try_pop().unwrap(), 10);
    rb.try_push(40).unwrap();

    assert_eq!(rb.try_pop().unwrap(), 20);
    assert_eq!(rb.try_pop().unwrap(), 30);
    assert_eq!(rb.try_pop().unwrap(), 40);
    assert_eq!(rb.try_pop(), None);

    println!("ring buffer ok");
}
