//! Report and progress formatting.
//!
//! # Report Layout
//!
//! Every report opens with a basic block and continues with whichever
//! sections have content. Sections are separated by a blank line and framed
//! by 70-column rules; items are `label : value` with the label padded to
//! 30 columns.
//!
//! ```text
//! ======================================================================
//! BASIC INFORMATION
//! ======================================================================
//! File Name                      : canon.jpg
//! File Size                      : 1.50 KB
//! Image Format                   : JPEG
//! Image Mode                     : RGB
//! Dimensions                     : 8 x 6
//!
//! ======================================================================
//! CAMERA INFORMATION
//! ======================================================================
//! Make                           : Canon
//! Model                          : EOS
//!
//! ======================================================================
//! CAMERA SETTINGS
//! ======================================================================
//! FNumber                        : f/4.0
//!
//! ======================================================================
//! GPS LOCATION DATA
//! ======================================================================
//! Latitude                       : 40.446111°
//! Longitude                      : -79.981944°
//! Coordinates                    : 40.446111, -79.981944
//! Google Maps                    : https://www.google.com/maps?q=40.44611111111111,-79.98194444444445
//! GPSVersionID                   : b"\x02\x02\x00\x00"
//!
//! Extracted 3 EXIF tags
//! ```
//!
//! Camera entries and leftover GPS tags are shown in their generic string
//! form; settings and raw tags go through [`format_value`]. Raw tags are
//! sorted by name, everything else keeps source order.
//!
//! # Batch Progress
//!
//! ```text
//! Found 3 supported files in photos
//! ============================================================
//!
//! [1/3] Processing: a.jpg
//! ...report lines...
//! Results saved to: save/metadata_a_20240101_120000.txt
//!
//! [2/3] Processing: broken.png
//! Failed: ...
//! ------------------------------------------------------------
//! Processed 3 files: 2 succeeded, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` and does no I/O; the
//! `print_*` wrappers write to stdout. Saved reports are the same lines
//! joined with newlines.

use crate::analyze::{BatchEvent, BatchSummary};
use crate::format::format_value;
use crate::gps::COORDINATE_TAGS;
use crate::record::{ContainerInfo, MetadataRecord};
use crate::value::{OrderedMap, TagValue};
use std::path::Path;

const LABEL_WIDTH: usize = 30;
const RULE_WIDTH: usize = 70;
const BATCH_RULE_WIDTH: usize = 60;

// ============================================================================
// Shared line helpers
// ============================================================================

/// Push a framed section header, preceded by a blank line unless it opens
/// the report.
fn section(lines: &mut Vec<String>, title: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(title.to_string());
    lines.push("=".repeat(RULE_WIDTH));
}

fn item(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<width$} : {}", label, value, width = LABEL_WIDTH)
}

/// A trailing message set off by a blank line.
fn note(lines: &mut Vec<String>, message: String) {
    lines.push(String::new());
    lines.push(message);
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Reports
// ============================================================================

/// Format a full report for one record.
pub fn format_record(record: &MetadataRecord) -> Vec<String> {
    let mut lines = Vec::new();
    let basic = &record.basic_info;

    section(&mut lines, "BASIC INFORMATION");
    lines.push(item("File Name", &basic.file_name));
    lines.push(item("File Size", &basic.file_size));

    match &basic.container {
        ContainerInfo::Image(info) => {
            lines.push(item("Image Format", &info.format));
            lines.push(item("Image Mode", &info.mode));
            lines.push(item(
                "Dimensions",
                format!("{} x {}", info.width, info.height),
            ));
            format_exif_sections(&mut lines, record);
        }
        ContainerInfo::Pdf(info) => {
            lines.push(item("Pages", info.num_pages));
            let empty = OrderedMap::new();
            format_pdf_sections(&mut lines, record.pdf_metadata.as_ref().unwrap_or(&empty));
        }
    }

    lines
}

fn format_exif_sections(lines: &mut Vec<String>, record: &MetadataRecord) {
    if !record.has_metadata() {
        note(lines, "No EXIF metadata found in this image".to_string());
        return;
    }

    if !record.camera_info.is_empty() {
        section(lines, "CAMERA INFORMATION");
        for (name, value) in record.camera_info.iter() {
            lines.push(item(name, value));
        }
    }

    if !record.settings_info.is_empty() {
        section(lines, "CAMERA SETTINGS");
        formatted_items(lines, record.settings_info.iter());
    }

    if let Some(lat) = record.gps_coords.latitude {
        section(lines, "GPS LOCATION DATA");
        lines.push(item("Latitude", format!("{:.6}°", lat)));
        match record.gps_coords.longitude {
            Some(lon) => {
                lines.push(item("Longitude", format!("{:.6}°", lon)));
                lines.push(item("Coordinates", format!("{:.6}, {:.6}", lat, lon)));
            }
            None => lines.push(item("Longitude", "N/A")),
        }
        if let Some(link) = &record.maps_link {
            lines.push(item("Google Maps", link));
        }
        for (name, value) in record.gps_info.iter() {
            if !COORDINATE_TAGS.contains(&name) {
                lines.push(item(name, value));
            }
        }
    }

    if !record.raw_exif.is_empty() {
        section(lines, "RAW EXIF DATA (ALL TAGS)");
        formatted_items(lines, record.raw_exif.sorted().into_iter());
    }

    note(lines, format!("Extracted {} EXIF tags", record.tag_count()));
}

fn formatted_items<'a>(
    lines: &mut Vec<String>,
    entries: impl Iterator<Item = (&'a str, &'a TagValue)>,
) {
    for (name, value) in entries {
        lines.push(item(name, format_value(name, value)));
    }
}

fn format_pdf_sections(lines: &mut Vec<String>, fields: &OrderedMap<String>) {
    if fields.is_empty() {
        note(lines, "No PDF metadata found in this document".to_string());
        return;
    }

    section(lines, "PDF METADATA");
    for (label, value) in fields.iter() {
        lines.push(item(label, value));
    }
    note(lines, format!("Extracted {} PDF metadata fields", fields.len()));
}

/// Pretty JSON for `--json` output.
pub fn format_record_json(record: &MetadataRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Print report or progress lines to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Batch progress
// ============================================================================

/// Format one batch progress event.
///
/// `Analyzed` yields the report lines themselves.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Started { dir, total } => vec![
            format!("Found {} supported files in {}", total, dir.display()),
            "=".repeat(BATCH_RULE_WIDTH),
        ],
        BatchEvent::FileStarted { index, total, path } => vec![
            String::new(),
            format!("[{}/{}] Processing: {}", index, total, file_name(path)),
        ],
        BatchEvent::Analyzed { analysis, .. } => analysis.lines.clone(),
        BatchEvent::Saved { report, .. } => {
            vec![format!("Results saved to: {}", report.display())]
        }
        BatchEvent::Failed { error, .. } => vec![format!("Failed: {}", error)],
    }
}

/// Closing lines of a batch run.
pub fn format_batch_summary(summary: &BatchSummary) -> Vec<String> {
    if summary.total == 0 {
        return vec![format!(
            "No supported files found in: {}",
            summary.dir.display()
        )];
    }
    vec![
        "-".repeat(BATCH_RULE_WIDTH),
        format!(
            "Processed {} files: {} succeeded, {} failed",
            summary.total, summary.succeeded, summary.failed
        ),
    ]
}
