//! Event list configuration.
//!
//! Configuration only affects setup: how many slots are pre-allocated before
//! the first block, and when growth is worth a warning. It never adds
//! validation to the per-event path.
//!
//! # Example
//!
//! ```ignore
//! use midibridge_core::{EventList, EventListConfig};
//!
//! pub const CONFIG: EventListConfig = EventListConfig::new()
//!     .with_initial_events(128)
//!     .with_warn_above_events(1024);
//!
//! let list = EventList::from_config(&CONFIG)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default number of pre-allocated slots.
pub const DEFAULT_INITIAL_EVENTS: usize = 0;

/// Slot counts are stored in the `VstEvents` `i32` counter, rounded to the
/// growth granularity.
pub const MAX_EVENTS: usize = (i32::MAX as usize) & !(crate::event_list::SLOT_GRANULARITY - 1);

/// Setup-time configuration for an [`EventList`](crate::EventList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventListConfig {
    /// Slots allocated up front so the first blocks do not grow the list.
    pub initial_events: usize,

    /// Log a warning when growth takes the slot count above this value.
    /// Upstream code is expected to bound event counts; this surfaces
    /// runaway producers without rejecting events.
    pub warn_above_events: Option<usize>,
}

impl EventListConfig {
    /// Configuration with no pre-allocation and no growth warning.
    pub const fn new() -> Self {
        Self {
            initial_events: DEFAULT_INITIAL_EVENTS,
            warn_above_events: None,
        }
    }

    /// Set the number of slots allocated at construction.
    pub const fn with_initial_events(mut self, events: usize) -> Self {
        self.initial_events = events;
        self
    }

    /// Set the slot count above which growth is logged as a warning.
    pub const fn with_warn_above_events(mut self, events: usize) -> Self {
        self.warn_above_events = Some(events);
        self
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the list cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.initial_events > MAX_EVENTS {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.initial_events,
                max: MAX_EVENTS,
            });
        }
        if let Some(warn_above) = self.warn_above_events {
            if warn_above < self.initial_events {
                return Err(ConfigError::WarnBelowInitial {
                    warn_above,
                    initial: self.initial_events,
                });
            }
        }
        Ok(())
    }
}

impl Default for EventListConfig {
    fn default() -> Self {
        Self::new()
    }
}
