//! Fixed binary layout of the legacy VST 2 event structures.
//!
//! These `#[repr(C)]` types mirror `aeffectx.h` field for field. They are
//! plain data: the event list never stores them, it serializes into them at
//! the interop boundary (see `midibridge-vst2`) and reads them back when a
//! foreign list arrives.

use std::ffi::c_char;
use std::mem::size_of;

/// Type tag of a short MIDI event (`kVstMidiType`).
pub const MIDI_TYPE: i32 = 1;

/// Type tag of a SysEx dump event (`kVstSysExType`).
pub const SYSEX_TYPE: i32 = 6;

/// Size of the inline payload of a short MIDI event.
pub const MIDI_DATA_SIZE: usize = 4;

/// `byte_size` written into every [`VstMidiEvent`] record.
pub const MIDI_EVENT_BYTE_SIZE: i32 = size_of::<VstMidiEvent>() as i32;

/// `byte_size` written into every [`VstMidiSysexEvent`] record.
pub const SYSEX_EVENT_BYTE_SIZE: i32 = size_of::<VstMidiSysexEvent>() as i32;

/// Generic event header as seen through a `VstEvents` pointer table.
///
/// Only `event_type` is inspected before reinterpreting the record as its
/// concrete shape.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct VstEvent {
    pub event_type: i32,
    pub byte_size: i32,
    pub delta_frames: i32,
    pub flags: i32,
    pub data: [u8; 16],
}

/// Short MIDI event record.
///
/// `note_length`, `note_offset`, `detune`, `note_off_velocity` and the two
/// reserved bytes exist for structural compatibility only and are always
/// written as zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VstMidiEvent {
    pub event_type: i32,
    pub byte_size: i32,
    pub delta_frames: i32,
    pub flags: i32,
    pub note_length: i32,
    pub note_offset: i32,
    pub midi_data: [u8; MIDI_DATA_SIZE],
    pub detune: i8,
    pub note_off_velocity: u8,
    pub reserved1: u8,
    pub reserved2: u8,
}

impl VstMidiEvent {
    /// Build a record with every padding field zeroed.
    pub const fn new(midi_data: [u8; MIDI_DATA_SIZE], delta_frames: i32) -> Self {
        Self {
            event_type: MIDI_TYPE,
            byte_size: MIDI_EVENT_BYTE_SIZE,
            delta_frames,
            flags: 0,
            note_length: 0,
            note_offset: 0,
            midi_data,
            detune: 0,
            note_off_velocity: 0,
            reserved1: 0,
            reserved2: 0,
        }
    }
}

/// SysEx dump record. `sysex_dump` points at `dump_bytes` bytes owned by
/// whoever produced the record.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VstMidiSysexEvent {
    pub event_type: i32,
    pub byte_size: i32,
    pub delta_frames: i32,
    pub flags: i32,
    pub dump_bytes: i32,
    pub resvd1: isize,
    pub sysex_dump: *mut c_char,
    pub resvd2: isize,
}

impl VstMidiSysexEvent {
    /// Build a record with `flags` and both reserved fields zeroed.
    pub const fn new(sysex_dump: *mut c_char, dump_bytes: i32, delta_frames: i32) -> Self {
        Self {
            event_type: SYSEX_TYPE,
            byte_size: SYSEX_EVENT_BYTE_SIZE,
            delta_frames,
            flags: 0,
            dump_bytes,
            resvd1: 0,
            sysex_dump,
            resvd2: 0,
        }
    }
}

impl Default for VstMidiSysexEvent {
    fn default() -> Self {
        Self::new(std::ptr::null_mut(), 0, 0)
    }
}

/// Outer container handed across the boundary.
///
/// `events` is a flexible array: the real table holds `num_events` pointers,
/// the declared length of 2 only matches the C header.
#[repr(C)]
#[derive(Debug)]
pub struct VstEvents {
    pub num_events: i32,
    pub reserved: isize,
    pub events: [*mut VstEvent; 2],
}

/// Number of pointer-sized words taken by the `VstEvents` fields that precede
/// the pointer table.
pub const EVENTS_HEADER_WORDS: usize = std::mem::offset_of!(VstEvents, events) / size_of::<*mut VstEvent>();

// The header must be a whole number of pointer words so the table can be
// backed by a plain pointer vector.
const _: () = assert!(std::mem::offset_of!(VstEvents, events) % size_of::<*mut VstEvent>() == 0);
const _: () = assert!(size_of::<VstMidiEvent>() == size_of::<VstEvent>());
const _: () = assert!(size_of::<VstMidiEvent>() == 32);
