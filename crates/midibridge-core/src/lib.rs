//! Core types for the midibridge event list.
//!
//! The central type is [`EventList`], a reusable list of timestamped MIDI
//! events shared between a plugin and its host once per processing block.
//! Events are stored as a Rust enum ([`Event`]); the legacy fixed binary
//! layout ([`layout`]) is only produced at the interop boundary.
//!
//! ## Modules
//!
//! - [`event`]: short / SysEx event variant
//! - [`event_list`]: slot-recycling list with 32-slot growth steps
//! - [`sink`]: [`EventSink`] append contract and the time-ordered [`MessageBuffer`]
//! - [`layout`]: `#[repr(C)]` mirrors of the VST 2 event structures
//! - [`config`]: setup-time [`EventListConfig`]

pub mod config;
pub mod error;
pub mod event;
pub mod event_list;
pub mod layout;
pub mod sink;

pub use config::{EventListConfig, MAX_EVENTS};
pub use error::{ConfigError, Result};
pub use event::{Event, EventKind, EventPayload, ShortMessage, SysExDump};
pub use event_list::{EventList, SLOT_GRANULARITY};
pub use sink::{EventSink, MessageBuffer, TimedMessage};
