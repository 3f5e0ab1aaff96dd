//! # Prefs Persistence Format
//!
//! Binary serialization for the persisted UI preferences. The dashboard
//! persists exactly one field across sessions: the active view selection.
//! Everything else is reseeded mock state.
//!
//! Format: Header (5 bytes) + postcard-serialized prefs.
//! - 4 bytes: Magic ("APAX")
//! - 1 byte: Version
//!
//! Validation (size limits, magic, version) runs before any payload
//! deserialization so corrupted or hostile files are rejected cheaply.

use serde::{Deserialize, Serialize};

use crate::primitives;
use crate::types::{ActiveView, ApaxError};

/// Minimum valid file size (header only).
const MIN_FILE_SIZE: usize = 5;

// =============================================================================
// PREFS PAYLOAD
// =============================================================================

/// The persisted slice of UI state.
///
/// Deliberately a struct rather than a bare enum: adding a second persisted
/// field later is a payload change, not a format redesign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiPrefs {
    pub active_view: ActiveView,
}

impl UiPrefs {
    /// Prefs selecting the given view.
    #[must_use]
    pub const fn new(active_view: ActiveView) -> Self {
        Self { active_view }
    }
}

// =============================================================================
// FILE HEADER
// =============================================================================

/// The persistence header precedes the prefs payload.
#[derive(Debug, Clone, Copy)]
pub struct PrefsHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl PrefsHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), ApaxError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(ApaxError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(ApaxError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ApaxError> {
        if bytes.len() < MIN_FILE_SIZE {
            return Err(ApaxError::SerializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for PrefsHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize prefs to bytes (header + payload).
///
/// This is a pure transformation - no file I/O.
pub fn prefs_to_bytes(prefs: &UiPrefs) -> Result<Vec<u8>, ApaxError> {
    let header = PrefsHeader::new();

    let payload = postcard::to_stdvec(prefs)
        .map_err(|e| ApaxError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(MIN_FILE_SIZE + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize prefs from bytes.
///
/// This is a pure transformation - no file I/O. Validates minimum size,
/// maximum payload size, and the header before touching the payload.
pub fn prefs_from_bytes(bytes: &[u8]) -> Result<UiPrefs, ApaxError> {
    if bytes.len() < MIN_FILE_SIZE {
        return Err(ApaxError::SerializationError(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > primitives::MAX_PREFS_PAYLOAD_SIZE {
        return Err(ApaxError::SerializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            primitives::MAX_PREFS_PAYLOAD_SIZE
        )));
    }

    let header = PrefsHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = &bytes[MIN_FILE_SIZE..];
    postcard::from_bytes(payload).map_err(|e| {
        ApaxError::DeserializationError(format!("Failed to deserialize prefs: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_roundtrip() {
        let header = PrefsHeader::new();
        let bytes = header.to_bytes();
        let restored = PrefsHeader::from_bytes(&bytes).expect("parse header");

        assert_eq!(restored.magic, *primitives::MAGIC_BYTES);
        assert_eq!(restored.version, primitives::FORMAT_VERSION);
    }

    #[test]
    fn bytes_roundtrip_bit_exact() {
        let prefs = UiPrefs::new(ActiveView::ProofOfReserve);

        let bytes1 = prefs_to_bytes(&prefs).expect("first serialize");
        let restored = prefs_from_bytes(&bytes1).expect("deserialize");
        let bytes2 = prefs_to_bytes(&restored).expect("second serialize");

        assert_eq!(restored, prefs);
        assert_eq!(
            bytes1, bytes2,
            "save -> load -> save must produce identical bytes"
        );
    }

    #[test]
    fn every_view_persists() {
        for view in [
            ActiveView::Dashboard,
            ActiveView::ProofOfReserve,
            ActiveView::Zakat,
            ActiveView::Redemption,
            ActiveView::Sharia,
        ] {
            let bytes = prefs_to_bytes(&UiPrefs::new(view)).expect("serialize");
            let restored = prefs_from_bytes(&bytes).expect("deserialize");
            assert_eq!(restored.active_view, view);
        }
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = prefs_to_bytes(&UiPrefs::default()).expect("serialize");
        bytes[0..4].copy_from_slice(b"XXXX");

        assert!(prefs_from_bytes(&bytes).is_err());
    }

    #[test]
    fn wrong_version_rejected() {
        let mut bytes = prefs_to_bytes(&UiPrefs::default()).expect("serialize");
        bytes[4] = primitives::FORMAT_VERSION + 1;

        assert!(prefs_from_bytes(&bytes).is_err());
    }

    #[test]
    fn truncated_data_rejected() {
        assert!(prefs_from_bytes(b"APA").is_err());
    }

    #[test]
    fn oversized_data_rejected() {
        let mut bytes = prefs_to_bytes(&UiPrefs::default()).expect("serialize");
        bytes.resize(primitives::MAX_PREFS_PAYLOAD_SIZE + 1, 0);

        assert!(prefs_from_bytes(&bytes).is_err());
    }
}
