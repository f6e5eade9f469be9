//! Event model stored in each [`EventList`](crate::EventList) slot.
//!
//! An event is either a short message (4 bytes inline, never allocates) or a
//! SysEx dump (owned heap buffer). The legacy fixed layout is only produced at
//! the interop boundary; nothing here reinterprets raw memory.

use crate::layout::{MIDI_DATA_SIZE, MIDI_EVENT_BYTE_SIZE, SYSEX_EVENT_BYTE_SIZE};

/// Discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Short message with a 4-byte inline payload.
    Short,
    /// Variable-length SysEx dump.
    SysEx,
}

impl EventKind {
    /// Size in bytes of the fixed-layout record for this kind.
    #[inline]
    pub const fn encoded_size(self) -> i32 {
        match self {
            Self::Short => MIDI_EVENT_BYTE_SIZE,
            Self::SysEx => SYSEX_EVENT_BYTE_SIZE,
        }
    }
}

/// Inline payload of a short event.
///
/// Always exactly [`MIDI_DATA_SIZE`] bytes; messages shorter than that are
/// zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortMessage {
    pub data: [u8; MIDI_DATA_SIZE],
}

impl ShortMessage {
    /// Build a message from up to 4 bytes. Missing bytes are zero.
    ///
    /// # Panics
    /// Panics if `bytes` is longer than [`MIDI_DATA_SIZE`].
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut data = [0u8; MIDI_DATA_SIZE];
        data[..bytes.len()].copy_from_slice(bytes);
        Self { data }
    }
}

/// Owned SysEx payload.
///
/// Assigning new contents replaces the old dump in place: the previous bytes
/// are released and the existing allocation is reused when it is large
/// enough, so a slot cycling through similar sized dumps does not allocate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SysExDump {
    bytes: Vec<u8>,
}

impl SysExDump {
    /// Create a dump holding a copy of `bytes`.
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Replace the contents with a copy of `bytes`.
    #[inline]
    pub fn assign(&mut self, bytes: &[u8]) {
        self.bytes.clear();
        self.bytes.extend_from_slice(bytes);
    }

    /// Dump contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of valid dump bytes (`dumpBytes` in the fixed layout).
    #[inline]
    pub fn dump_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Kind-specific part of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Short(ShortMessage),
    SysEx(SysExDump),
}

/// One timestamped event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    frame_offset: i32,
    payload: EventPayload,
}

impl Event {
    /// An unused slot: short kind, zero payload, frame 0.
    pub const fn idle() -> Self {
        Self {
            frame_offset: 0,
            payload: EventPayload::Short(ShortMessage {
                data: [0; MIDI_DATA_SIZE],
            }),
        }
    }

    /// Build an event the same way [`EventList::add_event`](crate::EventList::add_event)
    /// writes a slot.
    pub fn new(data: &[u8], frame_offset: i32) -> Self {
        let mut event = Self::idle();
        event.assign(data, frame_offset);
        event
    }

    /// Overwrite this event in place.
    ///
    /// Up to 4 bytes become a short message; a previous SysEx buffer is
    /// dropped. Longer data becomes a SysEx dump, reusing the previous dump's
    /// allocation if there was one.
    pub fn assign(&mut self, data: &[u8], frame_offset: i32) {
        self.frame_offset = frame_offset;

        if data.len() <= MIDI_DATA_SIZE {
            self.payload = EventPayload::Short(ShortMessage::from_bytes(data));
            return;
        }

        match &mut self.payload {
            EventPayload::SysEx(dump) => dump.assign(data),
            EventPayload::Short(_) => self.payload = EventPayload::SysEx(SysExDump::new(data)),
        }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Short(_) => EventKind::Short,
            EventPayload::SysEx(_) => EventKind::SysEx,
        }
    }

    /// Sample position of the event inside the current block.
    #[inline]
    pub fn frame_offset(&self) -> i32 {
        self.frame_offset
    }

    /// Size of the fixed-layout record this event serializes to.
    #[inline]
    pub fn encoded_size(&self) -> i32 {
        self.kind().encoded_size()
    }

    #[inline]
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Bytes a sink receives for this event: all 4 inline bytes for a short
    /// message, the whole dump for SysEx.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        match &self.payload {
            EventPayload::Short(message) => &message.data,
            EventPayload::SysEx(dump) => dump.as_bytes(),
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_event() {
        let event = Event::idle();
        assert_eq!(event.kind(), EventKind::Short);
        assert_eq!(event.frame_offset(), 0);
        assert_eq!(event.bytes(), &[0, 0, 0, 0]);
        assert_eq!(event.encoded_size(), MIDI_EVENT_BYTE_SIZE);
    }

    #[test]
    fn test_short_is_zero_padded() {
        let event = Event::new(&[0xC0, 0x05], 3);
        assert_eq!(event.kind(), EventKind::Short);
        assert_eq!(event.bytes(), &[0xC0, 0x05, 0x00, 0x00]);
    }

    #[test]
    fn test_empty_data_is_short() {
        let event = Event::new(&[], 7);
        assert_eq!(event.kind(), EventKind::Short);
        assert_eq!(event.bytes(), &[0, 0, 0, 0]);
        assert_eq!(event.frame_offset(), 7);
    }

    #[test]
    fn test_five_bytes_is_sysex() {
        let data = [0xF0, 0x7E, 0x00, 0x09, 0xF7];
        let event = Event::new(&data, 0);
        assert_eq!(event.kind(), EventKind::SysEx);
        assert_eq!(event.bytes(), &data);
        assert_eq!(event.encoded_size(), SYSEX_EVENT_BYTE_SIZE);
    }

    #[test]
    fn test_sysex_to_short_overwrites_payload() {
        let mut event = Event::new(&[0xF0; 10], 1);
        event.assign(&[0x80, 0x3C], 2);
        assert_eq!(event.kind(), EventKind::Short);
        assert_eq!(event.payload(), &EventPayload::Short(ShortMessage::from_bytes(&[0x80, 0x3C])));
        assert_eq!(event.frame_offset(), 2);
    }

    #[test]
    fn test_sysex_reassign_shrinks_dump() {
        let mut event = Event::new(&[0x11; 32], 0);
        event.assign(&[0x22; 6], 4);
        assert_eq!(event.bytes(), &[0x22; 6]);
        match event.payload() {
            EventPayload::SysEx(dump) => assert_eq!(dump.dump_bytes(), 6),
            other => panic!("expected SysEx, got {other:?}"),
        }
    }
}
