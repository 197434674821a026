//! Envelope encoding and decoding
//!
//! Backups are pretty-printed JSON objects. Decoding gates on
//! `format_version` before the other fields are looked at, and ignores any
//! field it does not know so newer producers can add metadata.

use serde_json::Value;

use crate::error::{BackupError, BackupResult};

use super::model::BackupEnvelope;

/// Major envelope version this build understands
const SUPPORTED_MAJOR_VERSION: u32 = 1;

/// Encode an envelope as pretty-printed JSON bytes
pub fn encode(envelope: &BackupEnvelope) -> BackupResult<Vec<u8>> {
    serde_json::to_vec_pretty(envelope)
        .map_err(|e| BackupError::Json(format!("Failed to serialize backup envelope: {}", e)))
}

/// Decode an envelope from JSON bytes
///
/// Fails with `MalformedEnvelope` when the bytes are not a JSON object or a
/// required field is missing or mistyped, and with
/// `UnsupportedFormatVersion` when the envelope comes from another major
/// format generation. An absent `format_version` is read as the current one.
pub fn decode(bytes: &[u8]) -> BackupResult<BackupEnvelope> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| BackupError::MalformedEnvelope(format!("not valid JSON: {}", e)))?;

    let Some(object) = value.as_object() else {
        return Err(BackupError::MalformedEnvelope(
            "expected a JSON object at the top level".into(),
        ));
    };

    match object.get("format_version") {
        None => {}
        Some(Value::String(version)) => {
            if !is_compatible_format_version(version) {
                return Err(BackupError::UnsupportedFormatVersion {
                    found: version.clone(),
                });
            }
        }
        Some(other) => {
            return Err(BackupError::MalformedEnvelope(format!(
                "format_version must be a string, found {}",
                other
            )));
        }
    }

    serde_json::from_value(value).map_err(|e| BackupError::MalformedEnvelope(e.to_string()))
}

/// Check whether an envelope format version can be decoded by this build
///
/// Minor versions are additive, so only the major component is compared.
pub fn is_compatible_format_version(version: &str) -> bool {
    version
        .split('.')
        .next()
        .and_then(|major| major.trim().parse::<u32>().ok())
        .map_or(false, |major| major == SUPPORTED_MAJOR_VERSION)
}
