//! Report persistence.
//!
//! Reports are written as the formatted lines joined with `\n` (no trailing
//! newline). Default file names are `metadata_{stem}_{YYYYMMDD_HHMMSS}.txt`
//! inside the save directory, stamped with local time. A name already taken
//! (two files with the same stem saved within one second) gets a `_1`, `_2`,
//! ... suffix; timestamped reports never overwrite each other. The save
//! directory, or a custom path's parent, is created on demand.

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Error saving file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FileSaver {
    save_dir: PathBuf,
}

impl FileSaver {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Where a report for `original_name` saved at `timestamp` goes.
    pub fn report_path(&self, original_name: &str, timestamp: DateTime<Local>) -> PathBuf {
        let stem = Path::new(original_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| original_name.to_string());
        self.save_dir.join(format!(
            "metadata_{}_{}.txt",
            stem,
            timestamp.format("%Y%m%d_%H%M%S")
        ))
    }

    /// Save under a timestamped name in the save directory.
    pub fn save(&self, lines: &[String], original_name: &str) -> Result<PathBuf, SaveError> {
        self.save_at(lines, original_name, Local::now())
    }

    /// Save under the name for `timestamp`, suffixed if that name is taken.
    pub fn save_at(
        &self,
        lines: &[String],
        original_name: &str,
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf, SaveError> {
        let base = self.report_path(original_name, timestamp);
        create_parent(&base)?;
        let content = lines.join("\n");

        let mut attempt = 0;
        loop {
            let path = numbered(&base, attempt);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())
                        .map_err(|source| SaveError::Io {
                            path: path.clone(),
                            source,
                        })?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(SaveError::Io { path, source }),
            }
        }
    }

    /// Save to an explicit path.
    pub fn save_to(&self, lines: &[String], path: &Path) -> Result<PathBuf, SaveError> {
        write_report(path, lines)?;
        Ok(path.to_path_buf())
    }
}

/// `base` for attempt 0, otherwise `base` with `_{attempt}` before the
/// extension.
fn numbered(base: &Path, attempt: u32) -> PathBuf {
    if attempt == 0 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{}_{}.txt", stem, attempt))
}

fn create_parent(path: &Path) -> Result<(), SaveError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}

fn write_report(path: &Path, lines: &[String]) -> Result<(), SaveError> {
    create_parent(path)?;
    fs::write(path, lines.join("\n")).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}
