//! JSON snapshot persistence for the leaderboard
//!
//! A snapshot is the full set of live users serialized as a single JSON
//! document. Writes are made durable the way the write-ahead log writes a
//! segment file: write the new content to a temp file in the same
//! directory, flush and sync it, then atomically rename it over the
//! target path. A reader never observes a half-written snapshot.

use crate::coordinator::Coordinator;
use leaderboard_core::{Error, Result, User};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    users: Vec<User>,
}

/// Writes every live user in `coordinator` to `path` as a single JSON
/// document, replacing any existing file atomically.
///
/// # Errors
///
/// Returns [`Error::Io`] if the temp file cannot be written, synced, or
/// renamed into place.
pub fn save(coordinator: &Coordinator, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
    }

    let snapshot = SnapshotFile {
        version: SNAPSHOT_VERSION,
        users: coordinator.snapshot(),
    };

    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)
            .map_err(|e| Error::Io(e.to_string()))?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    std::fs::rename(&tmp_path, path)?;
    log::info!("wrote snapshot to {} ({} users)", path.display(), snapshot.users.len());
    Ok(())
}

/// Loads every user recorded in the snapshot at `path` into `coordinator`.
///
/// A record that fails to load (duplicate id, out-of-range rating) is
/// logged and skipped rather than aborting the whole load, since a
/// snapshot is a best-effort warm start, not a transactional restore.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or is not valid
/// JSON in the expected shape.
pub fn load(coordinator: &Coordinator, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: SnapshotFile =
        serde_json::from_reader(reader).map_err(|e| Error::Io(e.to_string()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Error::Invalid(format!(
            "unsupported snapshot version {} (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }

    let mut loaded = 0;
    for user in snapshot.users {
        match coordinator.add_user(user.id.clone(), user.username.clone(), user.rating) {
            Ok(()) => loaded += 1,
            Err(err) => log::warn!("skipping snapshot record {}: {err}", user.id),
        }
    }

    log::info!("loaded snapshot from {} ({loaded} users)", path.display());
    Ok(loaded)
}
