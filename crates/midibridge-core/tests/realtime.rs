//! Steady-state blocks must run under the audio-thread allocation guard.

use assert_no_alloc::*;

use midibridge_core::{EventList, EventListConfig, EventSink, MessageBuffer};

#[cfg(debug_assertions)]
#[global_allocator]
static ALLOCATOR: AllocDisabler = AllocDisabler;

const SYSEX: [u8; 11] = [0xF0, 0x41, 0x10, 0x42, 0x12, 0x40, 0x00, 0x7F, 0x00, 0x41, 0xF7];

fn process_block(list: &mut EventList, sink: &mut MessageBuffer, block: u8) {
    list.clear();
    for i in 0..24u8 {
        if i % 6 == 0 {
            list.add_event(&SYSEX, i32::from(i) * 8);
        } else {
            list.add_event(&[0x90, block.wrapping_add(i) & 0x7F, 0x64], i32::from(i) * 8);
        }
    }

    sink.clear();
    EventList::transfer_into(list, sink);
}

#[test]
fn test_process_blocks_without_allocation() {
    let config = EventListConfig::new().with_initial_events(32);
    let mut list = EventList::from_config(&config).unwrap();
    let mut sink = MessageBuffer::with_capacity(64, 1024);

    // Warm-up block allocates the SysEx dumps.
    process_block(&mut list, &mut sink, 0);

    assert_no_alloc(|| {
        for block in 1..=64 {
            process_block(&mut list, &mut sink, block);
        }
    });

    assert_eq!(list.len(), 24);
    assert_eq!(sink.len(), 24);
}

#[test]
fn test_refill_from_buffer_without_allocation() {
    let mut incoming = MessageBuffer::with_capacity(32, 512);
    let mut list = EventList::with_capacity(32);

    incoming.append(&[0xB0, 0x01, 0x40], 10);
    incoming.append(&SYSEX, 0);
    incoming.append(&[0x80, 0x3C, 0x00], 5);
    incoming.transfer_into(&mut list);

    assert_no_alloc(|| {
        for _ in 0..16 {
            list.clear();
            incoming.transfer_into(&mut list);
        }
    });

    assert_eq!(list.len(), 3);
    assert_eq!(list.get(0).unwrap().bytes(), &SYSEX);
}
