//! Reusable, growable event list for real-time processing blocks.
//!
//! This module provides [`EventList`], which keeps every slot it has ever
//! grown to and recycles them across blocks, so the steady-state path of
//! `clear()` followed by a run of `add_event()` calls performs no heap
//! allocation.
//!
//! # Pattern
//!
//! 1. Optionally pre-allocate during setup (non-real-time)
//! 2. `clear()` at the start of each block (O(1), nothing is released)
//! 3. `add_event()` for each outgoing message
//! 4. Export or drain the list (see `midibridge-vst2`, [`EventList::transfer_into`])
//!
//! # Allocation
//!
//! Only two things allocate:
//! - Adding an event beyond the previous high-water mark grows the slot
//!   vector by whole steps of [`SLOT_GRANULARITY`] slots.
//! - Writing a SysEx dump into a slot that holds a short message, or a dump
//!   larger than the slot's previous one.
//!
//! Writing a short message into a SysEx slot releases the dump.

use crate::config::EventListConfig;
use crate::error::Result;
use crate::event::Event;
use crate::sink::EventSink;

/// Slot capacity always grows to a multiple of this.
pub const SLOT_GRANULARITY: usize = 32;

/// Capacity-amortized list of timestamped events.
///
/// Invariants:
/// - `len() <= capacity()`
/// - `capacity()` is zero or a multiple of [`SLOT_GRANULARITY`]
/// - every slot below `capacity()` holds a valid event; slots past `len()`
///   are idle or left over from a previous block
///
/// # Thread Safety
///
/// An `EventList` is filled by one thread per processing block. It holds no
/// locks; callers serialize access through `&mut`.
#[derive(Debug, Default)]
pub struct EventList {
    /// Every allocated slot. `slots.len()` is the allocated count.
    slots: Vec<Event>,
    /// Number of slots logically present.
    used: usize,
    /// Growth above this slot count is logged as a warning.
    warn_above: Option<usize>,
}

impl EventList {
    /// Create an empty list. Does not allocate.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            used: 0,
            warn_above: None,
        }
    }

    /// Create a list with at least `events` idle slots.
    ///
    /// Should be called during setup (non-real-time).
    pub fn with_capacity(events: usize) -> Self {
        let mut list = Self::new();
        list.ensure_capacity(events);
        list
    }

    /// Create a list from a validated configuration.
    pub fn from_config(config: &EventListConfig) -> Result<Self> {
        config.validate()?;

        let mut list = Self::new();
        list.warn_above = config.warn_above_events;
        list.ensure_capacity(config.initial_events);
        Ok(list)
    }

    /// Mark the list as empty. O(1) operation.
    ///
    /// Slot contents and SysEx buffers are kept for the next block.
    #[inline]
    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// Append an event.
    ///
    /// Up to 4 bytes are stored inline as a short message (zero-padded);
    /// longer data is stored as a SysEx dump.
    ///
    /// # Caller contract
    ///
    /// `data` should hold at least one byte and `frame_offset` should lie
    /// inside the current block. Neither is checked: this runs once per
    /// event on the audio thread. An empty `data` produces a short message
    /// with an all-zero payload.
    pub fn add_event(&mut self, data: &[u8], frame_offset: i32) {
        self.ensure_capacity(self.used + 1);
        self.slots[self.used].assign(data, frame_offset);
        self.used += 1;
    }

    /// Make sure at least `events` slots exist.
    ///
    /// When growing, the new slot count is the next multiple of
    /// [`SLOT_GRANULARITY`] above `events`. Existing slots are moved but not
    /// modified; new slots are idle short events.
    pub fn ensure_capacity(&mut self, events: usize) {
        let allocated = self.slots.len();
        if events <= allocated {
            return;
        }

        let new_allocated = (events + SLOT_GRANULARITY) & !(SLOT_GRANULARITY - 1);
        self.slots.reserve_exact(new_allocated - allocated);
        self.slots.resize_with(new_allocated, Event::idle);

        log::debug!("event list grew from {allocated} to {new_allocated} slots");
        if let Some(limit) = self.warn_above {
            if new_allocated > limit && allocated <= limit {
                log::warn!(
                    "event list grew to {new_allocated} slots, above the configured {limit}"
                );
            }
        }
    }

    /// Release every slot and SysEx buffer.
    ///
    /// Afterwards the list is equivalent to [`EventList::new()`] apart from
    /// its configuration. Dropping the list does the same.
    pub fn release_all(&mut self) {
        self.slots = Vec::new();
        self.used = 0;
    }

    /// Number of events currently in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Event at `index`, if it is below [`len()`](Self::len).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.as_slice().get(index)
    }

    /// Iterate over the events in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.as_slice().iter()
    }

    /// The events as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Event] {
        &self.slots[..self.used]
    }

    /// Append every event of `source`, in order, to `sink`.
    ///
    /// Short events contribute all 4 inline bytes; SysEx events contribute
    /// their whole dump. `source` is not modified.
    pub fn transfer_into<S: EventSink + ?Sized>(source: &EventList, sink: &mut S) {
        for event in source.iter() {
            sink.append(event.bytes(), event.frame_offset());
        }
    }
}

impl EventSink for EventList {
    #[inline]
    fn append(&mut self, bytes: &[u8], frame_offset: i32) {
        self.add_event(bytes, frame_offset);
    }
}

impl<'a> IntoIterator for &'a EventList {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
