//! Binary snapshot of the last fetched bundle
//!
//! Lets a restarted dashboard show the previous data immediately instead of
//! the loading screen. Encoded with `postcard`; the leading version byte
//! rejects snapshots written by an incompatible layout.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::model::ScreenBundle;

/// Layout version written into every snapshot
pub const SNAPSHOT_VERSION: u8 = 1;

/// A bundle together with the time it was fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u8,
    pub fetched_at: NaiveDateTime,
    pub bundle: ScreenBundle,
}

impl Snapshot {
    pub fn new(bundle: ScreenBundle, fetched_at: NaiveDateTime) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            fetched_at,
            bundle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("Snapshot encoding failed: {reason}")]
    Encode { reason: String },

    #[error("Snapshot decoding failed: {reason}")]
    Decode { reason: String },

    #[error("Snapshot version {found} is not supported (expected {expected})")]
    Version { found: u8, expected: u8 },
}

pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotError> {
    postcard::to_allocvec(snapshot).map_err(|err| SnapshotError::Encode {
        reason: err.to_string(),
    })
}

/// Decode a snapshot, rejecting other layout versions before parsing the rest.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    // postcard writes the leading u8 as a single raw byte
    let Some(&found) = bytes.first() else {
        return Err(SnapshotError::Decode {
            reason: "empty snapshot".to_string(),
        });
    };
    if found != SNAPSHOT_VERSION {
        return Err(SnapshotError::Version {
            found,
            expected: SNAPSHOT_VERSION,
        });
    }

    postcard::from_bytes(bytes).map_err(|err| SnapshotError::Decode {
        reason: err.to_string(),
    })
}
