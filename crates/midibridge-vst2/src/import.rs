//! Conversion of a foreign `VstEvents` list into an [`EventSink`].

use std::ptr;
use std::slice;

use midibridge_core::layout::{
    VstEvent, VstEvents, VstMidiEvent, VstMidiSysexEvent, MIDI_TYPE, SYSEX_TYPE,
};
use midibridge_core::EventSink;

/// Append every event of a foreign `VstEvents` list to `sink`, in table order.
///
/// - short MIDI events contribute all 4 inline bytes
/// - SysEx events contribute `dump_bytes` bytes of their dump
/// - null entries are skipped silently
/// - SysEx records with a null dump or a non-positive size, and records of
///   any other type, are skipped
///
/// The foreign list is only read.
///
/// # Safety
///
/// - `events` must be null or point to a valid `VstEvents` header followed by
///   at least `num_events` table entries
/// - every non-null entry must point to a record whose `event_type` matches
///   its concrete layout
/// - every SysEx dump must be readable for `dump_bytes` bytes
pub unsafe fn transfer_into<S: EventSink + ?Sized>(events: *const VstEvents, sink: &mut S) {
    if events.is_null() {
        return;
    }

    // SAFETY: `events` is non-null and the caller guarantees it is valid.
    let num_events = unsafe { (*events).num_events };
    if num_events <= 0 {
        return;
    }

    // SAFETY: `events` is valid; taking the field address does not read it.
    // The table is a flexible array, so entries are reached by offsetting the
    // first element rather than indexing the declared `[_; 2]`.
    let table = unsafe { ptr::addr_of!((*events).events) }.cast::<*mut VstEvent>();

    for index in 0..num_events as usize {
        // SAFETY: the caller guarantees `num_events` readable entries.
        let event = unsafe { *table.add(index) };
        if event.is_null() {
            continue;
        }

        // SAFETY: non-null entries point to valid records that start with
        // the common event header.
        let event_type = unsafe { (*event).event_type };
        match event_type {
            MIDI_TYPE => {
                // SAFETY: the type tag says this record is a VstMidiEvent.
                let midi = unsafe { &*event.cast::<VstMidiEvent>() };
                sink.append(&midi.midi_data, midi.delta_frames);
            }
            SYSEX_TYPE => {
                // SAFETY: the type tag says this record is a VstMidiSysexEvent.
                let sysex = unsafe { &*event.cast::<VstMidiSysexEvent>() };
                if sysex.sysex_dump.is_null() || sysex.dump_bytes <= 0 {
                    log::trace!("skipping empty SysEx event at index {index}");
                    continue;
                }
                // SAFETY: the dump is non-null and the caller guarantees it is
                // readable for `dump_bytes` bytes.
                let dump = unsafe {
                    slice::from_raw_parts(
                        sysex.sysex_dump.cast_const().cast::<u8>(),
                        sysex.dump_bytes as usize,
                    )
                };
                sink.append(dump, sysex.delta_frames);
            }
            other => log::trace!("skipping VST event of type {other} at index {index}"),
        }
    }
}
