//! Single-file and batch analysis driver.
//!
//! [`Analyzer::analyze_file`] extracts one file and formats its report.
//! [`Analyzer::analyze_folder`] runs that over every supported file in a
//! folder, strictly in path order, one at a time. A failing file is
//! reported through a [`BatchEvent::Failed`] and the run moves on; only a
//! folder that can't be scanned aborts the batch.

use crate::config::AnalysisConfig;
use crate::extract::{self, ExtractError};
use crate::output::format_record;
use crate::record::MetadataRecord;
use crate::save::{FileSaver, SaveError};
use crate::scan::{ScanError, discover_files};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// An extracted record and its formatted report lines.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub record: MetadataRecord,
    pub lines: Vec<String>,
}

/// Progress of a batch run, in the order events occur for each file.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started {
        dir: &'a Path,
        total: usize,
    },
    FileStarted {
        index: usize,
        total: usize,
        path: &'a Path,
    },
    Analyzed {
        path: &'a Path,
        analysis: &'a Analysis,
    },
    Saved {
        path: &'a Path,
        report: &'a Path,
    },
    Failed {
        path: &'a Path,
        error: &'a AnalyzeError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub dir: PathBuf,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub struct Analyzer {
    saver: Option<FileSaver>,
}

impl Analyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            saver: config.save.then(|| FileSaver::new(&config.save_dir)),
        }
    }

    /// Extract `path` and format its report.
    pub fn analyze_file(&self, path: &Path) -> Result<Analysis, AnalyzeError> {
        debug!("analyzing {}", path.display());
        let record = extract::extract(path)?;
        let lines = format_record(&record);
        Ok(Analysis { record, lines })
    }

    /// Save the report for `source`, to `custom` if given.
    ///
    /// Returns `None` when saving is disabled.
    pub fn save_report(
        &self,
        analysis: &Analysis,
        source: &Path,
        custom: Option<&Path>,
    ) -> Result<Option<PathBuf>, AnalyzeError> {
        let Some(saver) = &self.saver else {
            return Ok(None);
        };
        let report = match custom {
            Some(target) => saver.save_to(&analysis.lines, target)?,
            None => saver.save(&analysis.lines, &analysis.record.basic_info.file_name)?,
        };
        debug!("saved report for {} to {}", source.display(), report.display());
        Ok(Some(report))
    }

    /// Analyze every supported file in `dir`, reporting progress to `on_event`.
    pub fn analyze_folder<F>(
        &self,
        dir: &Path,
        recursive: bool,
        mut on_event: F,
    ) -> Result<BatchSummary, AnalyzeError>
    where
        F: FnMut(&BatchEvent),
    {
        let files = discover_files(dir, recursive)?;
        let total = files.len();
        let mut summary = BatchSummary {
            dir: dir.to_path_buf(),
            total,
            succeeded: 0,
            failed: 0,
        };
        if files.is_empty() {
            return Ok(summary);
        }

        on_event(&BatchEvent::Started { dir, total });

        for (i, path) in files.iter().enumerate() {
            on_event(&BatchEvent::FileStarted {
                index: i + 1,
                total,
                path,
            });

            match self.process_one(path, &mut on_event) {
                Ok(()) => summary.succeeded += 1,
                Err(error) => {
                    warn!("{}: {}", path.display(), error);
                    on_event(&BatchEvent::Failed {
                        path,
                        error: &error,
                    });
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    fn process_one<F>(&self, path: &Path, on_event: &mut F) -> Result<(), AnalyzeError>
    where
        F: FnMut(&BatchEvent),
    {
        let analysis = self.analyze_file(path)?;
        on_event(&BatchEvent::Analyzed {
            path,
            analysis: &analysis,
        });
        if let Some(report) = self.save_report(&analysis, path, None)? {
            on_event(&BatchEvent::Saved {
                path,
                report: &report,
            });
        }
        Ok(())
    }
}
