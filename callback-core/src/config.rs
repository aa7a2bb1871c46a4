//! Library configuration types
//!
//! The callback core has almost nothing to configure; the only tunable is
//! where callback output goes. Applications embed [`SinkConfig`] in their own
//! configuration files.

use serde::{Deserialize, Serialize};

/// Which output sink to create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Write lines to standard output
    #[default]
    Stdout,
    /// Forward lines to the `log` facade
    Log,
    /// Keep lines in memory
    Memory,
}

/// Output sink configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink kind (default: stdout)
    #[serde(default)]
    pub kind: SinkKind,

    /// Prefix stdout lines with a UTC timestamp
    #[serde(default)]
    pub timestamps: bool,
}

impl SinkConfig {
    /// Create a sink configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: choose the sink kind
    pub fn with_kind(mut self, kind: SinkKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method: enable or disable timestamps
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }
}
