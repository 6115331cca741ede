use lapring::RingBuffer;
use std::{sync::Arc, thread};

fn main() {
    let rb = Arc::new(RingBuffer::<u8>::new(10));

    let smsg = "The quick brown fox jumps over the lazy dog";

    let pjh = thread::spawn({
        let rb = rb.clone();
        move || {
            println!("-> sending message: '{}'", smsg);

            for byte in smsg.bytes().chain([0]) {
                rb.push(byte, None).unwrap();
            }

            println!("-> message sent");
        }
    });

    let cjh = thread::spawn({
        let rb = rb.clone();
        move || {
            println!("<- receiving message");

            let mut bytes = Vec::<u8>::new();
            loop {
                let byte = rb.pop(None).unwrap();
                if byte == 0 {
                    break;
                }
                bytes.push(byte);
            }

            let msg = String::from_utf8(bytes).unwrap();
            println!("<- message received: '{}'", msg);

            msg
        }
    });

    pjh.join().unwrap();
    let rmsg = cjh.join().unwrap();

    assert_eq!(smsg, rmsg);
}
