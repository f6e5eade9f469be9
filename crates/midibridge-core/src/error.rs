//! Error types for event list configuration.
//!
//! List operations themselves are infallible: malformed foreign entries are
//! skipped and allocation failure aborts.

/// Errors that can occur while loading or validating an
/// [`EventListConfig`](crate::EventListConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    Parse(serde_json::Error),
    /// A slot count exceeds what the `VstEvents` counter can address.
    CapacityTooLarge { requested: usize, max: usize },
    /// The growth warning threshold is below the pre-allocated slot count.
    WarnBelowInitial { warn_above: usize, initial: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid event list config: {e}"),
            Self::CapacityTooLarge { requested, max } => {
                write!(f, "event capacity {requested} exceeds maximum of {max}")
            }
            Self::WarnBelowInitial { warn_above, initial } => write!(
                f,
                "warn_above_events ({warn_above}) is below initial_events ({initial})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
