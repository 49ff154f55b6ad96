//! Extraction orchestration: path validation and container dispatch.
//!
//! Both extractors implement [`Extractor`] and return a complete
//! [`MetadataRecord`] or an error; there are no partial records.
//!
//! | Extension | Extractor |
//! |---|---|
//! | `.jpg .jpeg .png .tiff .bmp .gif` | [`ImageExtractor`] |
//! | `.pdf` | [`PdfExtractor`] |
//!
//! Extensions are matched case-insensitively. Validation checks existence
//! first, then the extension, before any decoder runs.

mod image;
mod pdf;

pub use self::image::{ImageExtractor, gps_tag_name};
pub use self::pdf::PdfExtractor;

use crate::record::{BasicInfo, ContainerInfo, MetadataRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "bmp", "gif"];
pub const PDF_EXTENSION: &str = "pdf";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported file type: {extension}\nSupported formats: {}", supported_formats())]
    UnsupportedFormat { extension: String },
    /// The decoder rejected the file content. Carries the decoder's message.
    #[error("{0}")]
    CorruptContainer(String),
    #[error("Error extracting metadata: {0}")]
    ExtractionFailure(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a file into a [`MetadataRecord`].
pub trait Extractor {
    fn extract(&self, path: &Path) -> Result<MetadataRecord, ExtractError>;
}

/// Which extractor handles a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
}

impl FileKind {
    /// Classify by extension alone. `None` for anything unsupported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileKind::Image)
        } else if ext == PDF_EXTENSION {
            Some(FileKind::Pdf)
        } else {
            None
        }
    }
}

/// All supported extensions as a display list: `.jpg, .jpeg, ..., .pdf`.
pub fn supported_formats() -> String {
    SUPPORTED_IMAGE_EXTENSIONS
        .iter()
        .copied()
        .chain([PDF_EXTENSION])
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that `path` exists and has a supported extension.
pub fn validate_path(path: &Path) -> Result<FileKind, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    FileKind::from_path(path).ok_or_else(|| ExtractError::UnsupportedFormat {
        extension: path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_else(|| "(none)".to_string()),
    })
}

/// Validate `path` and run the matching extractor.
pub fn extract(path: &Path) -> Result<MetadataRecord, ExtractError> {
    match validate_path(path)? {
        FileKind::Image => ImageExtractor.extract(path),
        FileKind::Pdf => PdfExtractor.extract(path),
    }
}

/// File name and size, shared by both extractors.
fn basic_info(path: &Path, container: ContainerInfo) -> Result<BasicInfo, ExtractError> {
    let size = fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(BasicInfo::new(name, size, container))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ExifFixture, write_jpeg_with_exif, write_pdf};
    use tempfile::TempDir;

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn kind_from_extension_is_case_insensitive() {
        assert_eq!(FileKind::from_path(Path::new("a.JPG")), Some(FileKind::Image));
        assert_eq!(FileKind::from_path(Path::new("a.Tiff")), Some(FileKind::Image));
        assert_eq!(FileKind::from_path(Path::new("a.PDF")), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_path(Path::new("a.txt")), None);
        assert_eq!(FileKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn supported_formats_lists_everything() {
        assert_eq!(
            supported_formats(),
            ".jpg, .jpeg, .png, .tiff, .bmp, .gif, .pdf"
        );
    }

    #[test]
    fn missing_file_is_not_found_even_with_bad_extension() {
        let tmp = TempDir::new().unwrap();
        let result = validate_path(&tmp.path().join("ghost.txt"));
        assert!(matches!(result, Err(ExtractError::NotFound(_))));
    }

    #[test]
    fn unsupported_extension_lists_supported_set() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.TXT");
        fs::write(&path, "hello").unwrap();

        let err = validate_path(&path).unwrap_err();
        assert!(matches!(&err, ExtractError::UnsupportedFormat { extension } if extension == ".txt"));
        let msg = err.to_string();
        assert!(msg.starts_with("Unsupported file type: .txt"));
        assert!(msg.contains(".jpeg"));
        assert!(msg.contains(".pdf"));
    }

    #[test]
    fn extraction_failure_message_keeps_cause() {
        let err = ExtractError::ExtractionFailure("bad IFD".into());
        assert_eq!(err.to_string(), "Error extracting metadata: bad IFD");
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    #[test]
    fn extract_dispatches_images() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shot.jpg");
        write_jpeg_with_exif(&path, &ExifFixture::canon_pittsburgh());

        let record = extract(&path).unwrap();
        assert!(!record.is_pdf());
        assert_eq!(record.basic_info.file_name, "shot.jpg");
        assert!(record.basic_info.file_size_bytes > 0);
    }

    #[test]
    fn extract_dispatches_pdfs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.pdf");
        write_pdf(&path, 2, &[("Title", "Hello")]);

        let record = extract(&path).unwrap();
        assert!(record.is_pdf());
    }

    #[test]
    fn extract_rejects_before_decoding() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.csv");
        fs::write(&path, "a,b").unwrap();
        assert!(matches!(
            extract(&path),
            Err(ExtractError::UnsupportedFormat { .. })
        ));
    }
}
