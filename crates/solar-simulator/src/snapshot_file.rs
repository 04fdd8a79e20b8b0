//! On-disk copy of the last fetched bundle

use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};

use solar_core::snapshot::{self, Snapshot};

/// Read a snapshot written by an earlier run.
///
/// A missing file is normal on first start; a corrupt or outdated one is
/// logged and ignored.
pub fn load(path: &Path) -> Option<Snapshot> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            warn!("Reading {} failed: {}", path.display(), err);
            return None;
        }
    };

    match snapshot::decode(&bytes) {
        Ok(snapshot) => {
            info!(
                "Loaded snapshot from {} (fetched {})",
                path.display(),
                snapshot.fetched_at
            );
            Some(snapshot)
        }
        Err(err) => {
            warn!("Ignoring {}: {}", path.display(), err);
            None
        }
    }
}

pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), String> {
    let bytes = snapshot::encode(snapshot).map_err(|err| err.to_string())?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|err| format!("{}: {err}", dir.display()))?;
    }
    std::fs::write(path, bytes).map_err(|err| format!("{}: {err}", path.display()))
}
