//! Save file for scores and preferences.
//!
//! Persistence is best effort: a missing or unreadable file starts a fresh
//! match, and a failed write only logs a warning.

use std::path::Path;
use tictac_core::MatchSnapshot;
use tracing::{debug, instrument, warn};

/// Reads a snapshot, or `None` when there is nothing usable on disk.
#[instrument(fields(path = %path.display()))]
pub fn load_snapshot(path: &Path) -> Option<MatchSnapshot> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No save file yet");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Could not read save file");
            return None;
        }
    };

    match MatchSnapshot::from_json(&content) {
        Ok(snapshot) => {
            debug!(round = snapshot.round(), "Save file loaded");
            Some(snapshot)
        }
        Err(e) => {
            warn!(error = %e, "Ignoring corrupt save file");
            None
        }
    }
}

/// Writes a snapshot, logging instead of failing.
#[instrument(skip(snapshot), fields(path = %path.display()))]
pub fn save_snapshot(path: &Path, snapshot: &MatchSnapshot) {
    let json = match snapshot.to_json() {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Could not serialize save data");
            return;
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        warn!(error = %e, "Could not write save file");
    } else {
        debug!("Save file written");
    }
}
