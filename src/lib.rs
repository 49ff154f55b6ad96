//! # metainfo
//!
//! Extracts embedded metadata from images and PDFs (EXIF tags, GPS
//! position, document properties) and renders it as a readable report.
//!
//! # Architecture: Decode, Normalize, Present
//!
//! ```text
//! file ──► extract ──► raw tag map ──► categorize ──► MetadataRecord ──► output ──► stdout / save
//!                 └──► raw GPS map ──► gps ─────────┘
//!                 └──► PDF info ─────► pdf ─────────┘
//! ```
//!
//! Container decoding is delegated to `image`, `kamadak-exif` and `lopdf`.
//! Everything after the raw maps is pure: the normalization steps take
//! values and return values, and the formatter returns lines instead of
//! printing them. That keeps the domain rules testable without fixtures on
//! disk.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`value`] | `TagValue` variants, insertion-ordered `OrderedMap`, generic string form |
//! | [`categorize`] | Split tags into camera, settings and other buckets |
//! | [`format`] | Tag-aware value formatting and display truncation |
//! | [`gps`] | DMS to decimal degrees, GPS tag naming, map links |
//! | [`pdf`] | Document-info labels and PDF date formatting |
//! | [`record`] | `MetadataRecord` assembly, basic container facts, file sizes |
//! | [`extract`] | Path validation and the image/PDF extractors |
//! | [`output`] | Report and batch progress lines, JSON rendering |
//! | [`save`] | Timestamped or custom-path report files |
//! | [`scan`] | Supported-file discovery for folder mode |
//! | [`analyze`] | Single-file and sequential batch driver |
//! | [`config`] | `metainfo.toml` loading, merging and validation |
//!
//! # Design Decisions
//!
//! ## Closed Value Type
//!
//! Decoders produce integers, rationals, strings, byte blobs and lists of
//! those. [`value::TagValue`] names each shape, so the formatter and the GPS
//! converter match exhaustively instead of probing an untyped value.
//!
//! ## Order-Preserving Maps
//!
//! Camera and settings blocks display in decoder order, PDF fields in label
//! table order. [`value::OrderedMap`] keeps insertion order; only the raw
//! tag block is sorted, at display time.
//!
//! ## Lossy GPS, Strict Containers
//!
//! A malformed GPS triple just leaves that axis empty. A container the
//! decoder rejects fails the whole file: records are built in one step and
//! never returned half-filled.

pub mod analyze;
pub mod categorize;
pub mod config;
pub mod extract;
pub mod format;
pub mod gps;
pub mod output;
pub mod pdf;
pub mod record;
pub mod save;
pub mod scan;
pub mod value;

#[cfg(test)]
pub(crate) mod test_helpers;
