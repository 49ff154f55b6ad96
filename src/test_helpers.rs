//! Shared fixtures for the metainfo test suite.
//!
//! Everything is synthesised on the fly so no binary fixtures live in the
//! repository:
//!
//! - [`write_jpeg_with_exif`] encodes a tiny JPEG and attaches an EXIF block
//!   (IFD0, Exif IFD and an optional GPS IFD) built from an [`ExifFixture`]
//!   with the EXIF writer, inserted as an APP1 segment via `img-parts`.
//! - [`write_plain_image`] writes an image with no metadata at all.
//! - [`write_pdf`] builds a PDF with `lopdf`, with a chosen page count and
//!   document-info entries.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let path = tmp.path().join("shot.jpg");
//! write_jpeg_with_exif(&path, &ExifFixture::canon_pittsburgh());
//! ```

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use lopdf::{Document, Object, dictionary};
use std::fs;
use std::io::Cursor;
use std::path::Path;

pub const JPEG_WIDTH: u32 = 8;
pub const JPEG_HEIGHT: u32 = 6;

// =========================================================================
// EXIF description
// =========================================================================

#[derive(Debug, Clone)]
pub struct GpsFixture {
    pub latitude: [u32; 3],
    pub latitude_ref: &'static str,
    pub longitude: [u32; 3],
    pub longitude_ref: &'static str,
}

#[derive(Debug, Clone)]
pub struct ExifFixture {
    pub make: &'static str,
    pub model: &'static str,
    pub f_number: (u32, u32),
    pub gps: Option<GpsFixture>,
}

impl ExifFixture {
    /// Canon EOS, f/4, shot at 40°26'46"N 79°58'55"W.
    pub fn canon_pittsburgh() -> Self {
        Self {
            make: "Canon",
            model: "EOS",
            f_number: (4, 1),
            gps: Some(GpsFixture {
                latitude: [40, 26, 46],
                latitude_ref: "N",
                longitude: [79, 58, 55],
                longitude_ref: "W",
            }),
        }
    }

    /// Primary-image fields. The writer places Exif and GPS context tags in
    /// their sub-IFDs and emits the pointers itself.
    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            primary(Tag::Make, ascii(self.make)),
            primary(Tag::Model, ascii(self.model)),
            primary(Tag::FNumber, Value::Rational(vec![rational(self.f_number)])),
        ];
        if let Some(gps) = &self.gps {
            fields.extend([
                primary(Tag::GPSVersionID, Value::Byte(vec![2, 2, 0, 0])),
                primary(Tag::GPSLatitudeRef, ascii(gps.latitude_ref)),
                primary(Tag::GPSLatitude, dms(gps.latitude)),
                primary(Tag::GPSLongitudeRef, ascii(gps.longitude_ref)),
                primary(Tag::GPSLongitude, dms(gps.longitude)),
            ]);
        }
        fields
    }
}

fn primary(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

fn rational((num, denom): (u32, u32)) -> Rational {
    Rational { num, denom }
}

fn dms(parts: [u32; 3]) -> Value {
    Value::Rational(parts.iter().map(|n| rational((*n, 1))).collect())
}

/// Little-endian TIFF bytes carrying the fields of `fixture`.
pub fn exif_tiff(fixture: &ExifFixture) -> Vec<u8> {
    let fields = fixture.fields();
    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).unwrap();
    buf.into_inner()
}

// =========================================================================
// File writers
// =========================================================================

fn test_pattern() -> RgbImage {
    RgbImage::from_fn(JPEG_WIDTH, JPEG_HEIGHT, |x, y| {
        image::Rgb([(x * 30) as u8, (y * 40) as u8, 128])
    })
}

/// Write a small JPEG carrying the EXIF described by `fixture`.
pub fn write_jpeg_with_exif(path: &Path, fixture: &ExifFixture) {
    let img = test_pattern();
    let mut encoded = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut encoded)
        .write_image(img.as_raw(), JPEG_WIDTH, JPEG_HEIGHT, ExtendedColorType::Rgb8)
        .unwrap();

    let mut jpeg = Jpeg::from_bytes(Bytes::from(encoded)).unwrap();
    jpeg.set_exif(Some(Bytes::from(exif_tiff(fixture))));

    let mut out = Vec::new();
    jpeg.encoder().write_to(&mut out).unwrap();
    fs::write(path, out).unwrap();
}

/// Write an image in `format` with no embedded metadata.
pub fn write_plain_image(path: &Path, format: ImageFormat) {
    test_pattern().save_with_format(path, format).unwrap();
}

/// Write a PDF with `pages` blank pages and the given document-info entries.
/// No `/Info` dictionary is written when `info` is empty.
pub fn write_pdf(path: &Path, pages: usize, info: &[(&str, &str)]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            page_id.into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if !info.is_empty() {
        let mut dict = lopdf::Dictionary::new();
        for (key, value) in info {
            dict.set(*key, Object::string_literal(*value));
        }
        let info_id = doc.add_object(dict);
        doc.trailer.set("Info", info_id);
    }

    doc.save(path).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_back(fixture: &ExifFixture) -> exif::Exif {
        exif::Reader::new().read_raw(exif_tiff(fixture)).unwrap()
    }

    #[test]
    fn tiff_round_trips_through_reader() {
        let exif = read_back(&ExifFixture::canon_pittsburgh());
        let make = exif.get_field(Tag::Make, In::PRIMARY).unwrap();
        assert!(matches!(&make.value, Value::Ascii(v) if v[0] == b"Canon"));
        assert!(exif.get_field(Tag::FNumber, In::PRIMARY).is_some());
        assert!(exif.get_field(Tag::GPSLongitude, In::PRIMARY).is_some());
    }

    #[test]
    fn tiff_without_gps_has_no_gps_fields() {
        let fixture = ExifFixture {
            gps: None,
            ..ExifFixture::canon_pittsburgh()
        };
        let exif = read_back(&fixture);
        assert!(exif.get_field(Tag::GPSLatitude, In::PRIMARY).is_none());
        assert!(exif.get_field(Tag::Model, In::PRIMARY).is_some());
    }
}
