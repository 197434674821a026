//! The backup envelope value

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope schema version written by this generation
pub const FORMAT_VERSION: &str = "1.0";

/// Producer version recorded when the application version is unavailable
pub const UNKNOWN_PRODUCER_VERSION: &str = "unknown";

/// Payload recorded when the live store has no backing content yet
pub const EMPTY_PAYLOAD: &str = "{}";

/// A versioned wrapper around the raw contents of a preference store
///
/// The payload is carried as an opaque string and is never parsed. Fields are
/// private so an envelope cannot change after construction; decoding and
/// [`BackupEnvelope::new`] are the only ways to obtain one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEnvelope {
    /// Version of the envelope schema, not of the wrapped content
    #[serde(default = "default_format_version")]
    format_version: String,

    /// Milliseconds since the Unix epoch at export time
    #[serde(default)]
    created_at: i64,

    /// Version of the application that produced the backup
    producer_version: String,

    /// Verbatim serialized contents of the live store
    payload: String,
}

fn default_format_version() -> String {
    FORMAT_VERSION.to_string()
}

impl BackupEnvelope {
    /// Create a fresh envelope in the current format
    pub fn new(
        created_at: i64,
        producer_version: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            created_at,
            producer_version: producer_version.into(),
            payload: payload.into(),
        }
    }

    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Export time as a UTC timestamp, if it is within chrono's range
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    pub fn producer_version(&self) -> &str {
        &self.producer_version
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}
