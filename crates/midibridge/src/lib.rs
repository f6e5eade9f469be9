//! # midibridge
//!
//! Real-time MIDI event lists for the plugin/host boundary.
//!
//! A plugin or host fills an [`EventList`](core::EventList) once per
//! processing block, hands it across the boundary in the legacy VST 2 event
//! layout, and reads foreign lists back into any
//! [`EventSink`](core::EventSink). After warm-up, none of this allocates.
//!
//! ## Architecture
//!
//! ```text
//! EventList (slot-recycling Rust enum storage)
//!        ↓ export                 ↑ add_event / EventSink
//! Vst2EventBlock (fixed layout)   MessageBuffer (time-ordered sink)
//!        ↓                        ↑ transfer_into
//! VstEvents*  ───────────────────▶
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use midibridge::prelude::*;
//!
//! let mut list = EventList::from_config(&EventListConfig::new().with_initial_events(64))?;
//! let mut sink = MessageBuffer::with_capacity(64, 1024);
//!
//! // Once per block
//! list.clear();
//! list.add_event(&[0x90, 0x40, 0x7F], 0);
//! list.add_event(&[0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7], 128);
//!
//! sink.clear();
//! EventList::transfer_into(&list, &mut sink);
//! ```

// Re-export sub-crates
pub use midibridge_core as core;

#[cfg(feature = "vst2")]
pub use midibridge_vst2 as vst2;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use midibridge::prelude::*;
/// ```
pub mod prelude {
    pub use midibridge_core::{
        // Configuration
        ConfigError, EventListConfig,
        // Event model
        Event, EventKind, EventPayload, ShortMessage, SysExDump,
        // List and sinks
        EventList, EventSink, MessageBuffer, TimedMessage,
    };

    #[cfg(feature = "vst2")]
    pub use midibridge_vst2::{ExportedEvents, Vst2EventBlock};
}
