//! Destinations for normalized timestamped messages.
//!
//! [`EventSink`] is the append contract every conversion routine writes into.
//! [`MessageBuffer`] is the stock implementation: a flat, time-ordered store
//! that keeps its capacity across [`clear()`](MessageBuffer::clear) so it can
//! be refilled every block without allocating.

/// Append-only destination for timestamped binary messages.
pub trait EventSink {
    /// Append one message at `frame_offset`. Ordering is the sink's concern.
    fn append(&mut self, bytes: &[u8], frame_offset: i32);
}

/// A message read back from a [`MessageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedMessage<'a> {
    /// Sample position inside the block.
    pub frame_offset: i32,
    /// Raw message bytes.
    pub bytes: &'a [u8],
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    frame_offset: i32,
    start: usize,
    len: usize,
}

/// Time-ordered buffer of raw messages.
///
/// Message bytes live back to back in one vector; a separate index keeps the
/// entries sorted by frame offset. A message appended at an offset that is
/// already present lands after the existing ones, so source order is kept
/// for simultaneous events.
#[derive(Debug, Clone, Default)]
pub struct MessageBuffer {
    data: Vec<u8>,
    entries: Vec<Entry>,
}

impl MessageBuffer {
    /// Create an empty buffer (no capacity reserved).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with room for `events` messages totalling `bytes` bytes.
    ///
    /// Should be called during setup (non-real-time).
    pub fn with_capacity(events: usize, bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            entries: Vec::with_capacity(events),
        }
    }

    /// Remove all messages. O(1), keeps capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
        self.entries.clear();
    }

    /// Number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message at `index` in time order.
    pub fn get(&self, index: usize) -> Option<TimedMessage<'_>> {
        self.entries.get(index).map(|entry| self.message(entry))
    }

    /// Iterate over messages in time order.
    pub fn iter(&self) -> impl Iterator<Item = TimedMessage<'_>> + '_ {
        self.entries.iter().map(|entry| self.message(entry))
    }

    /// Frame offset of the first message, if any.
    pub fn first_frame_offset(&self) -> Option<i32> {
        self.entries.first().map(|entry| entry.frame_offset)
    }

    /// Frame offset of the last message, if any.
    pub fn last_frame_offset(&self) -> Option<i32> {
        self.entries.last().map(|entry| entry.frame_offset)
    }

    /// Pour every message, in time order, into another sink.
    ///
    /// This is the outgoing direction: a plugin fills a buffer during
    /// processing and the buffer is then written into an
    /// [`EventList`](crate::EventList) for the host.
    pub fn transfer_into<S: EventSink + ?Sized>(&self, sink: &mut S) {
        for message in self.iter() {
            sink.append(message.bytes, message.frame_offset);
        }
    }

    #[inline]
    fn message(&self, entry: &Entry) -> TimedMessage<'_> {
        TimedMessage {
            frame_offset: entry.frame_offset,
            bytes: &self.data[entry.start..entry.start + entry.len],
        }
    }
}

impl EventSink for MessageBuffer {
    fn append(&mut self, bytes: &[u8], frame_offset: i32) {
        let entry = Entry {
            frame_offset,
            start: self.data.len(),
            len: bytes.len(),
        };
        self.data.extend_from_slice(bytes);

        // Common case: events arrive in time order.
        if self
            .entries
            .last()
            .map_or(true, |last| last.frame_offset <= frame_offset)
        {
            self.entries.push(entry);
        } else {
            let index = self
                .entries
                .partition_point(|existing| existing.frame_offset <= frame_offset);
            self.entries.insert(index, entry);
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn append(&mut self, bytes: &[u8], frame_offset: i32) {
        (**self).append(bytes, frame_offset);
    }
}
