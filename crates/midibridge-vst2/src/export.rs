//! Serialization of an [`EventList`] into the raw `VstEvents` layout.
//!
//! [`Vst2EventBlock`] owns the fixed-layout records and the pointer table
//! handed to the other side of the boundary. Both are kept between blocks and
//! only grow when the exported list has grown, so exporting a list whose size
//! stays under its previous high-water mark does not allocate.
//!
//! # Pointer validity
//!
//! SysEx records point straight into the list's owned dumps; nothing is
//! copied. The [`ExportedEvents`] guard borrows both the block and the list,
//! so the raw pointer it hands out cannot outlive either of them, and the
//! list cannot be mutated while the export is alive.

use std::ffi::c_char;
use std::marker::PhantomData;
use std::mem::{size_of, MaybeUninit};
use std::ptr;

use midibridge_core::layout::{
    VstEvent, VstEvents, VstMidiEvent, VstMidiSysexEvent, EVENTS_HEADER_WORDS,
};
use midibridge_core::{EventList, EventPayload, EventSink, SLOT_GRANULARITY};

/// The declared `events[2]` of the C header: the table never has fewer entries.
const MIN_TABLE_ENTRIES: usize = 2;

/// Fields of `VstEvents` preceding the pointer table.
#[repr(C)]
struct EventsHeader {
    num_events: i32,
    reserved: isize,
}

const _: () = assert!(size_of::<EventsHeader>() == EVENTS_HEADER_WORDS * size_of::<*mut VstEvent>());

/// Storage for one fixed-layout record, large enough for either shape.
#[repr(C)]
#[derive(Clone, Copy)]
union EventRecord {
    midi: VstMidiEvent,
    sysex: VstMidiSysexEvent,
}

impl EventRecord {
    const fn idle() -> Self {
        Self {
            midi: VstMidiEvent::new([0; 4], 0),
        }
    }
}

/// Reusable export storage for the VST 2 event layout.
pub struct Vst2EventBlock {
    /// One record per list slot.
    records: Vec<EventRecord>,
    /// `VstEvents` header words followed by the pointer table.
    table: Vec<MaybeUninit<*mut VstEvent>>,
}

// SAFETY: The raw pointers stored in `records` and `table` are only written,
// never dereferenced, by the block itself. They target the block's own
// records or dumps of an `EventList` that is borrowed for as long as the
// corresponding `ExportedEvents` guard lives.
unsafe impl Send for Vst2EventBlock {}

impl Vst2EventBlock {
    /// Create empty export storage.
    pub fn new() -> Self {
        let mut block = Self {
            records: Vec::new(),
            table: Vec::new(),
        };
        block.reset_table(MIN_TABLE_ENTRIES);
        block
    }

    /// Create export storage for lists of up to `events` slots.
    ///
    /// Should be called during setup (non-real-time).
    pub fn with_capacity(events: usize) -> Self {
        let mut block = Self::new();
        block.ensure_slots(events);
        block
    }

    /// Number of records the block can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Serialize the used events of `list`.
    ///
    /// The pointer table is sized to the list's slot capacity (a multiple of
    /// 32) while `num_events` carries the logical count. Every padding,
    /// flag and reserved field is written as zero.
    pub fn export<'a>(&'a mut self, list: &'a EventList) -> ExportedEvents<'a> {
        self.ensure_slots(list.capacity());

        let entries = &mut self.table[EVENTS_HEADER_WORDS..];
        for ((event, record), entry) in list
            .iter()
            .zip(self.records.iter_mut())
            .zip(entries.iter_mut())
        {
            *record = match event.payload() {
                EventPayload::Short(message) => EventRecord {
                    midi: VstMidiEvent::new(message.data, event.frame_offset()),
                },
                EventPayload::SysEx(dump) => EventRecord {
                    sysex: VstMidiSysexEvent::new(
                        dump.as_bytes().as_ptr().cast_mut().cast::<c_char>(),
                        dump.dump_bytes() as i32,
                        event.frame_offset(),
                    ),
                },
            };
            *entry = MaybeUninit::new((record as *mut EventRecord).cast::<VstEvent>());
        }

        let header = EventsHeader {
            num_events: i32::try_from(list.len()).unwrap_or(i32::MAX),
            reserved: 0,
        };
        let events = self.table.as_mut_ptr().cast::<VstEvents>();
        // SAFETY: `table` always holds at least EVENTS_HEADER_WORDS words, the
        // header is exactly that many pointer words (checked at compile time)
        // and pointer alignment satisfies the header's alignment.
        unsafe { events.cast::<EventsHeader>().write(header) };

        ExportedEvents {
            events,
            len: list.len(),
            table_entries: self.table.len() - EVENTS_HEADER_WORDS,
            _marker: PhantomData,
        }
    }

    /// Grow records and table to hold `events` slots.
    ///
    /// Uses the list's own growth steps so both stay in lockstep.
    fn ensure_slots(&mut self, events: usize) {
        if events <= self.records.len() {
            return;
        }

        let slots = events.next_multiple_of(SLOT_GRANULARITY);
        self.records.resize(slots, EventRecord::idle());
        // Entries from a previous export would point into the old records.
        self.reset_table(slots.max(MIN_TABLE_ENTRIES));

        log::debug!("VST event block grew to {slots} records");
    }

    fn reset_table(&mut self, entries: usize) {
        self.table.clear();
        self.table
            .resize(EVENTS_HEADER_WORDS + entries, MaybeUninit::new(ptr::null_mut()));
    }
}

impl Default for Vst2EventBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// A serialized list, ready to hand across the boundary.
pub struct ExportedEvents<'a> {
    events: *mut VstEvents,
    len: usize,
    table_entries: usize,
    _marker: PhantomData<(&'a mut Vst2EventBlock, &'a EventList)>,
}

impl ExportedEvents<'_> {
    /// Pointer to pass to the other side (`processEvents` /
    /// `audioMasterProcessEvents`). Valid while `self` lives.
    #[inline]
    pub fn as_ptr(&self) -> *const VstEvents {
        self.events
    }

    /// Mutable pointer for C signatures that take `VstEvents*`.
    ///
    /// The receiver must not write through it.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut VstEvents {
        self.events
    }

    /// Number of exported events (`num_events`).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries in the pointer table.
    #[inline]
    pub fn table_entries(&self) -> usize {
        self.table_entries
    }

    /// Read the exported events back into a sink, exactly as a foreign list
    /// would be read.
    pub fn transfer_into<S: EventSink + ?Sized>(&self, sink: &mut S) {
        // SAFETY: The table and every record it points to were written by
        // `Vst2EventBlock::export` and are borrowed for the guard's lifetime,
        // as are the SysEx dumps of the source list.
        unsafe { crate::import::transfer_into(self.events, sink) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midibridge_core::layout::{
        MIDI_EVENT_BYTE_SIZE, MIDI_TYPE, SYSEX_EVENT_BYTE_SIZE, SYSEX_TYPE,
    };
    use midibridge_core::MessageBuffer;

    /// Read entry `index` of an exported table.
    fn entry(exported: &ExportedEvents<'_>, index: usize) -> *const VstEvent {
        let table = exported.as_ptr().cast::<*mut VstEvent>();
        // SAFETY: index is below table_entries in every caller and the table
        // follows the header words.
        unsafe { *table.add(EVENTS_HEADER_WORDS + index) }
    }

    #[test]
    fn test_export_empty_list() {
        let list = EventList::new();
        let mut block = Vst2EventBlock::new();
        let exported = block.export(&list);

        assert!(exported.is_empty());
        assert_eq!(exported.table_entries(), MIN_TABLE_ENTRIES);
        // SAFETY: header written by export.
        assert_eq!(unsafe { (*exported.as_ptr()).num_events }, 0);
        // SAFETY: header written by export.
        assert_eq!(unsafe { (*exported.as_ptr()).reserved }, 0);
    }

    #[test]
    fn test_export_short_event() {
        let mut list = EventList::new();
        list.add_event(&[0x90, 0x40, 0x7F], 17);

        let mut block = Vst2EventBlock::new();
        let exported = block.export(&list);
        assert_eq!(exported.len(), 1);
        assert_eq!(exported.table_entries(), 32);

        // SAFETY: entry 0 points at a short record written by export.
        let midi = unsafe { *entry(&exported, 0).cast::<VstMidiEvent>() };
        assert_eq!(midi.event_type, MIDI_TYPE);
        assert_eq!(midi.byte_size, MIDI_EVENT_BYTE_SIZE);
        assert_eq!(midi.delta_frames, 17);
        assert_eq!(midi.midi_data, [0x90, 0x40, 0x7F, 0x00]);
        assert_eq!(midi.flags, 0);
        assert_eq!(midi.note_length, 0);
        assert_eq!(midi.note_offset, 0);
        assert_eq!(midi.detune, 0);
        assert_eq!(midi.note_off_velocity, 0);
        assert_eq!(midi.reserved1, 0);
        assert_eq!(midi.reserved2, 0);
    }

    #[test]
    fn test_export_sysex_event() {
        let dump = [0xF0, 0x41, 0x10, 0x42, 0x12, 0x40, 0x00, 0x7F, 0x00, 0x41, 0xF7];
        let mut list = EventList::new();
        list.add_event(&dump, 3);

        let mut block = Vst2EventBlock::new();
        let exported = block.export(&list);

        // SAFETY: entry 0 points at a SysEx record written by export.
        let sysex = unsafe { *entry(&exported, 0).cast::<VstMidiSysexEvent>() };
        assert_eq!(sysex.event_type, SYSEX_TYPE);
        assert_eq!(sysex.byte_size, SYSEX_EVENT_BYTE_SIZE);
        assert_eq!(sysex.delta_frames, 3);
        assert_eq!(sysex.dump_bytes, dump.len() as i32);
        assert_eq!(sysex.flags, 0);
        assert_eq!(sysex.resvd1, 0);
        assert_eq!(sysex.resvd2, 0);
        assert_eq!(
            sysex.sysex_dump.cast_const().cast::<u8>(),
            list.get(0).unwrap().bytes().as_ptr()
        );
    }

    #[test]
    fn test_table_follows_list_capacity() {
        let mut list = EventList::new();
        for i in 0..40 {
            list.add_event(&[0xB0, 0x01, i as u8], i);
        }

        let mut block = Vst2EventBlock::new();
        let exported = block.export(&list);
        assert_eq!(exported.len(), 40);
        assert_eq!(exported.table_entries(), list.capacity());
        assert_eq!(exported.table_entries() % SLOT_GRANULARITY, 0);
        // SAFETY: header written by export.
        assert_eq!(unsafe { (*exported.as_ptr()).num_events }, 40);
    }

    #[test]
    fn test_export_after_clear() {
        let mut list = EventList::new();
        list.add_event(&[0x90, 0x40, 0x7F], 0);
        list.add_event(&[0xF0; 8], 1);
        list.clear();

        let mut block = Vst2EventBlock::with_capacity(64);
        let exported = block.export(&list);
        assert!(exported.is_empty());
        // SAFETY: header written by export.
        assert_eq!(unsafe { (*exported.as_ptr()).num_events }, 0);
    }

    #[test]
    fn test_exported_round_trip() {
        let mut list = EventList::new();
        list.add_event(&[0x90, 0x40, 0x7F, 0x00], 0);
        list.add_event(&[0x00; 16], 10);

        let mut block = Vst2EventBlock::new();
        let exported = block.export(&list);
        let mut sink = MessageBuffer::new();
        exported.transfer_into(&mut sink);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get(0).unwrap().bytes, &[0x90, 0x40, 0x7F, 0x00]);
        assert_eq!(sink.get(0).unwrap().frame_offset, 0);
        assert_eq!(sink.get(1).unwrap().bytes, &[0x00; 16]);
        assert_eq!(sink.get(1).unwrap().frame_offset, 10);
    }

    #[test]
    fn test_block_reused_across_growth() {
        let mut list = EventList::new();
        let mut block = Vst2EventBlock::new();

        list.add_event(&[0x90, 0x40, 0x7F], 0);
        assert_eq!(block.export(&list).len(), 1);
        assert_eq!(block.capacity(), 32);

        for i in 0..70 {
            list.add_event(&[0xF0, i as u8, 0, 0, 0xF7], i);
        }
        let exported = block.export(&list);
        assert_eq!(exported.len(), 71);

        let mut sink = MessageBuffer::new();
        exported.transfer_into(&mut sink);
        assert_eq!(sink.len(), 71);
        assert_eq!(sink.get(70).unwrap().bytes, &[0xF0, 69, 0, 0, 0xF7]);
        assert_eq!(block.capacity(), 96);
    }
}
