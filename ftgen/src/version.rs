//! Next-version resolution across the script output directories.
//!
//! Both script formats share one version sequence, so the next version is one past the
//! highest `V<n>__` prefix found in *any* of the directories.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{GenerateError, GenerateResult};

static MIGRATION_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^V(\d+)__(.+)\.(\w+)$").expect("migration filename pattern is valid"));

/// Extract the version from a `V<integer>__<name>.<ext>` filename.
///
/// Returns `None` for non-matching names and for versions that do not fit in a `u32`.
pub fn parse_version(filename: &str) -> Option<u32> {
    MIGRATION_FILE
        .captures(filename)
        .and_then(|captures| captures[1].parse().ok())
}

/// Highest version among the files directly inside `dir`. Absent directories count as 0.
///
/// A migration file whose version does not fit in a `u32` is a [`GenerateError::VersionOverflow`].
pub fn max_version_in(dir: &Path) -> GenerateResult<u32> {
    Ok(latest_in(dir)?.map_or(0, |(version, _)| version))
}

fn latest_in(dir: &Path) -> GenerateResult<Option<(u32, PathBuf)>> {
    if !dir.exists() {
        return Ok(None);
    }

    let entries = std::fs::read_dir(dir).map_err(|err| GenerateError::io("list", dir, err))?;
    let mut latest: Option<(u32, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|err| GenerateError::io("list", dir, err))?;
        let file_name = entry.file_name();
        let Some(captures) = file_name.to_str().and_then(|name| MIGRATION_FILE.captures(name)) else {
            continue;
        };
        let version: u32 = captures[1]
            .parse()
            .map_err(|_| GenerateError::VersionOverflow { path: entry.path() })?;
        if latest.as_ref().is_none_or(|(max, _)| version > *max) {
            latest = Some((version, entry.path()));
        }
    }
    Ok(latest)
}

/// Next version shared by every script produced in this run.
///
/// A directory that cannot be listed is logged and treated as empty, since the other
/// directory may still hold the real maximum. An overflowing version is fatal.
pub fn next_version(dirs: &[&Path]) -> GenerateResult<u32> {
    let mut latest: Option<(u32, PathBuf)> = None;
    for dir in dirs {
        match latest_in(dir) {
            Ok(Some((version, path))) => {
                debug!("latest version in {}: {version}", dir.display());
                if latest.as_ref().is_none_or(|(max, _)| version > *max) {
                    latest = Some((version, path));
                }
            }
            Ok(None) => debug!("no migrations in {}", dir.display()),
            Err(err @ GenerateError::Io { .. }) => warn!("could not scan {} for versions: {err}", dir.display()),
            Err(err) => return Err(err),
        }
    }

    match latest {
        None => Ok(1),
        Some((version, path)) => version
            .checked_add(1)
            .ok_or(GenerateError::VersionOverflow { path }),
    }
}
