//! VST 2 interop boundary for the midibridge event list.
//!
//! Everything that touches raw `VstEvents` memory lives here:
//!
//! ```text
//! EventList ──export──▶ Vst2EventBlock ──*const VstEvents──▶ other side
//! other side ──*const VstEvents──▶ transfer_into ──▶ EventSink
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // Setup (non-real-time)
//! let mut outgoing = EventList::with_capacity(64);
//! let mut block = Vst2EventBlock::with_capacity(64);
//! let mut incoming = MessageBuffer::with_capacity(256, 4096);
//!
//! // Each block (real-time)
//! incoming.clear();
//! unsafe { midibridge_vst2::transfer_into(host_events, &mut incoming) };
//!
//! outgoing.clear();
//! plugin_output.transfer_into(&mut outgoing);
//! let mut exported = block.export(&outgoing);
//! host.process_events(exported.as_mut_ptr());
//! ```

pub mod export;
pub mod import;

pub use export::{ExportedEvents, Vst2EventBlock};
pub use import::transfer_into;
pub use midibridge_core::layout;
