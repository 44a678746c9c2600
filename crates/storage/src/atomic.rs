// SPDX-License-Identifier: MIT

//! Atomic YAML artifact persistence: write-to-temp-then-rename so a
//! crash mid-write never leaves a half-written `run.yaml`/`plan.yaml`
//! behind, and a corrupt file on read is rotated aside rather than
//! silently eaten (spec §4.2). Generalizes the engine's snapshot
//! write/load pattern to any single YAML-backed artifact.

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

const MAX_BAK_FILES: u32 = 3;

/// Serializes `value` to YAML and writes it to `path` atomically: write
/// to `path.tmp`, `sync_all`, then rename over `path`.
pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(value).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp_path = tmp_path_for(path);
    std::fs::write(&tmp_path, yaml)?;
    let file = std::fs::File::open(&tmp_path)?;
    file.sync_all()?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Reads and parses `path`. A missing file returns `Ok(None)`. A file
/// that fails to parse is rotated to `path.bak` (keeping up to
/// [`MAX_BAK_FILES`] prior backups) and `Ok(None)` is returned, so a
/// caller can treat it the same as "never written" rather than crash-
/// looping on a corrupt artifact.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    match serde_yaml::from_str(&contents) {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            rotate_bak(path)?;
            Ok(None)
        }
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn bak_path(path: &Path, n: u32) -> PathBuf {
    let mut bak = path.as_os_str().to_owned();
    if n == 1 {
        bak.push(".bak");
    } else {
        bak.push(format!(".bak.{n}"));
    }
    PathBuf::from(bak)
}

fn rotate_bak(path: &Path) -> Result<(), StorageError> {
    let oldest = bak_path(path, MAX_BAK_FILES);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }
    for n in (1..MAX_BAK_FILES).rev() {
        let from = bak_path(path, n);
        if from.exists() {
            std::fs::rename(&from, bak_path(path, n + 1))?;
        }
    }
    std::fs::rename(path, bak_path(path, 1))?;
    Ok(())
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
