//! The normalized per-file metadata record.
//!
//! A [`MetadataRecord`] is built once per analyzed file by one of two
//! constructors, [`MetadataRecord::from_image`] or [`MetadataRecord::from_pdf`],
//! and is not modified afterwards. Container facts live in [`BasicInfo`];
//! the image and PDF variants keep their format-specific facts in separate
//! [`ContainerInfo`] arms so neither carries fields that don't apply to it.

use crate::categorize::categorize_tags;
use crate::gps::{GpsCoordinates, parse_gps};
use crate::pdf::map_pdf_metadata;
use crate::value::{OrderedMap, TagMap, TagValue};
use serde::Serialize;

/// Sub-directory pointers that may appear among primary tags. GPS data
/// arrives through its own channel, so these never enter the record.
const GPS_POINTER_TAGS: &[&str] = &["GPSInfo", "GPSInfoIFDPointer"];

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

/// Read-only facts about the file and its container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicInfo {
    pub file_name: String,
    /// Human-readable size, e.g. `1.50 KB`.
    pub file_size: String,
    pub file_size_bytes: u64,
    #[serde(flatten)]
    pub container: ContainerInfo,
}

impl BasicInfo {
    pub fn new(file_name: impl Into<String>, size_bytes: u64, container: ContainerInfo) -> Self {
        Self {
            file_name: file_name.into(),
            file_size: format_file_size(size_bytes),
            file_size_bytes: size_bytes,
            container,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContainerInfo {
    Image(ImageInfo),
    Pdf(PdfInfo),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    /// Container format name, e.g. `JPEG`.
    pub format: String,
    /// Colour mode, e.g. `RGB`.
    pub mode: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfInfo {
    pub num_pages: usize,
}

/// Raw EXIF as handed over by the image decoder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExif {
    /// Primary-image tags keyed by name.
    pub tags: TagMap,
    /// GPS entries keyed by numeric tag id, in source order.
    pub gps: Vec<(u16, TagValue)>,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRecord {
    pub basic_info: BasicInfo,
    pub camera_info: TagMap,
    pub settings_info: TagMap,
    /// Decoded GPS tags, including the coordinate tags.
    pub gps_info: TagMap,
    pub gps_coords: GpsCoordinates,
    pub maps_link: Option<String>,
    /// Tags in neither the camera nor the settings set.
    pub raw_exif: TagMap,
    /// Labelled document-info fields. `None` for images.
    pub pdf_metadata: Option<OrderedMap<String>>,
}

impl MetadataRecord {
    /// Assemble an image record: categorize the primary tags and decode GPS.
    ///
    /// `resolve_gps` names numeric GPS tag ids.
    pub fn from_image<F>(basic_info: BasicInfo, exif: RawExif, resolve_gps: F) -> Self
    where
        F: Fn(u16) -> Option<String>,
    {
        let tags: TagMap = exif
            .tags
            .into_iter()
            .filter(|(name, _)| !GPS_POINTER_TAGS.contains(&name.as_str()))
            .collect();
        let categorized = categorize_tags(tags);
        let gps = parse_gps(&exif.gps, resolve_gps);

        Self {
            basic_info,
            camera_info: categorized.camera_info,
            settings_info: categorized.settings_info,
            maps_link: gps.coordinates.maps_link(),
            gps_info: gps.tags,
            gps_coords: gps.coordinates,
            raw_exif: categorized.other_tags,
            pdf_metadata: None,
        }
    }

    /// Assemble a PDF record from the raw document-info dictionary.
    pub fn from_pdf(basic_info: BasicInfo, raw_info: &OrderedMap<String>) -> Self {
        Self {
            basic_info,
            camera_info: TagMap::new(),
            settings_info: TagMap::new(),
            gps_info: TagMap::new(),
            gps_coords: GpsCoordinates::default(),
            maps_link: None,
            raw_exif: TagMap::new(),
            pdf_metadata: Some(map_pdf_metadata(raw_info)),
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self.basic_info.container, ContainerInfo::Pdf(_))
    }

    /// Whether any EXIF tag or PDF field was found.
    pub fn has_metadata(&self) -> bool {
        self.tag_count() > 0
    }

    /// Number of categorized EXIF tags, or PDF fields for documents.
    pub fn tag_count(&self) -> usize {
        match &self.pdf_metadata {
            Some(fields) => fields.len(),
            None => self.camera_info.len() + self.settings_info.len() + self.raw_exif.len(),
        }
    }
}

/// Format a byte count with binary prefixes and two decimals.
///
/// ```text
/// 0      -> 0 Bytes
/// 512    -> 512.00 Bytes
/// 1536   -> 1.50 KB
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, SIZE_UNITS[unit])
}
