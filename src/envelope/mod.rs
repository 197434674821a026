//! Backup envelope format
//!
//! A backup is a single JSON object:
//!
//! ```json
//! {
//!   "format_version": "1.0",
//!   "created_at": 1704164645000,
//!   "producer_version": "0.4.0",
//!   "payload": "{\"theme\":\"dark\"}"
//! }
//! ```
//!
//! `payload` is the live preference store's raw contents, stored and
//! replayed byte for byte.

mod codec;
mod model;

pub use codec::{decode, encode, is_compatible_format_version};
pub use model::{BackupEnvelope, EMPTY_PAYLOAD, FORMAT_VERSION, UNKNOWN_PRODUCER_VERSION};
