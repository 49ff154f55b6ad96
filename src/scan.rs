//! Folder discovery for batch runs.
//!
//! Lists regular files with a supported extension (see
//! [`crate::extract::FileKind`]), sorted by full path. Only the folder's own
//! entries are visited unless `recursive` is set. Hidden files are not
//! special-cased. Entries the walk can't read (an unreadable subfolder, a
//! vanished file) are logged and skipped.

use crate::extract::FileKind;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Supported files under `dir`, sorted by path.
pub fn discover_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    Ok(supported_files(walker))
}

fn supported_files<I>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = walkdir::Result<DirEntry>>,
{
    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|e| warn!("skipping unreadable entry: {}", e))
                .ok()
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            if FileKind::from_path(entry.path()).is_some() {
                Some(entry.into_path())
            } else {
                debug!("skipping unsupported {}", entry.path().display());
                None
            }
        })
        .collect();

    files.sort();
    files
}
