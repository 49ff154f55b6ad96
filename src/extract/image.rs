//! Image extraction: container facts via `image`, tags via `kamadak-exif`.
//!
//! Only the container header is read for format, colour mode and
//! dimensions; pixels are never decoded. EXIF is read separately:
//!
//! | EXIF field | Destination |
//! |---|---|
//! | IFD0 and Exif sub-IFD of the primary image | raw tag map, by name |
//! | GPS sub-IFD | GPS entries, by numeric id |
//! | Interoperability IFD, thumbnail IFD | ignored |
//!
//! BMP and GIF carry no EXIF, so the reader isn't consulted for them.

use super::{ExtractError, Extractor, basic_info};
use crate::record::{ContainerInfo, ImageInfo, MetadataRecord, RawExif};
use crate::value::TagValue;
use ::image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use exif::{Context, Field, In, Tag, Value};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads JPEG, PNG, TIFF, BMP and GIF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageExtractor;

impl Extractor for ImageExtractor {
    fn extract(&self, path: &Path) -> Result<MetadataRecord, ExtractError> {
        let info = read_container(path)?;
        debug!(
            "{}: {} {} {}x{}",
            path.display(),
            info.format,
            info.mode,
            info.width,
            info.height
        );

        let exif = if carries_exif(&info.format) {
            read_exif(path)?
        } else {
            RawExif::default()
        };
        debug!(
            "{}: {} primary tags, {} GPS tags",
            path.display(),
            exif.tags.len(),
            exif.gps.len()
        );

        let basic = basic_info(path, ContainerInfo::Image(info))?;
        Ok(MetadataRecord::from_image(basic, exif, gps_tag_name))
    }
}

/// Name of a GPS tag id, if the EXIF tables know it.
pub fn gps_tag_name(id: u16) -> Option<String> {
    let tag = Tag(Context::Gps, id);
    tag.description().map(|_| tag.to_string())
}

fn carries_exif(format: &str) -> bool {
    matches!(format, "JPEG" | "PNG" | "TIFF")
}

fn read_container(path: &Path) -> Result<ImageInfo, ExtractError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| ExtractError::CorruptContainer("Unrecognized image format".into()))?;
    let decoder = reader
        .into_decoder()
        .map_err(|e| ExtractError::CorruptContainer(e.to_string()))?;
    let (width, height) = decoder.dimensions();

    Ok(ImageInfo {
        format: format_name(format),
        mode: mode_name(decoder.color_type()),
        width,
        height,
    })
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        other => format!("{:?}", other).to_uppercase(),
    }
}

fn mode_name(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;32F",
        ColorType::Rgba32F => "RGBA;32F",
        _ => "unknown",
    }
    .to_string()
}

fn read_exif(path: &Path) -> Result<RawExif, ExtractError> {
    let mut reader = BufReader::new(File::open(path)?);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(e) => return exif_failure(path, e),
    };

    let mut raw = RawExif::default();
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        match field.tag.context() {
            Context::Tiff | Context::Exif => raw.tags.insert(tag_name(field.tag), convert(field)),
            Context::Gps => raw.gps.push((field.tag.number(), convert(field))),
            _ => {}
        }
    }
    Ok(raw)
}

/// A missing EXIF block is an empty result. Every other reader error,
/// including I/O raised while parsing a truncated block, fails extraction.
fn exif_failure(path: &Path, e: exif::Error) -> Result<RawExif, ExtractError> {
    match e {
        exif::Error::NotFound(_) => {
            debug!("{}: no EXIF data", path.display());
            Ok(RawExif::default())
        }
        e => Err(ExtractError::ExtractionFailure(e.to_string())),
    }
}

/// Display name for a primary-image tag; unknown ids use their number.
fn tag_name(tag: Tag) -> String {
    if tag.description().is_none() {
        return tag.number().to_string();
    }
    if tag == Tag::PhotographicSensitivity {
        "ISOSpeedRatings".to_string()
    } else {
        tag.to_string()
    }
}

fn convert(field: &Field) -> TagValue {
    convert_value(&field.value)
}

/// Single-element arrays collapse to a scalar.
fn collapse(mut items: Vec<TagValue>) -> TagValue {
    if items.len() == 1 {
        items.remove(0)
    } else {
        TagValue::Sequence(items)
    }
}

#[allow(unreachable_patterns)]
fn convert_value(value: &Value) -> TagValue {
    match value {
        Value::Ascii(strings) => collapse(
            strings
                .iter()
                .map(|s| {
                    let text = String::from_utf8_lossy(s);
                    TagValue::Text(text.trim_end_matches('\0').to_string())
                })
                .collect(),
        ),
        Value::Byte(bytes) => TagValue::Bytes(bytes.clone()),
        Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
        Value::Short(v) => collapse(v.iter().map(|n| TagValue::Int(i64::from(*n))).collect()),
        Value::Long(v) => collapse(v.iter().map(|n| TagValue::Int(i64::from(*n))).collect()),
        Value::SByte(v) => collapse(v.iter().map(|n| TagValue::Int(i64::from(*n))).collect()),
        Value::SShort(v) => collapse(v.iter().map(|n| TagValue::Int(i64::from(*n))).collect()),
        Value::SLong(v) => collapse(v.iter().map(|n| TagValue::Int(i64::from(*n))).collect()),
        Value::Rational(v) => collapse(
            v.iter()
                .map(|r| TagValue::Rational(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::SRational(v) => collapse(
            v.iter()
                .map(|r| TagValue::Rational(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::Float(v) => collapse(v.iter().map(|f| TagValue::Float(f64::from(*f))).collect()),
        Value::Double(v) => collapse(v.iter().map(|f| TagValue::Float(*f)).collect()),
        Value::Unknown(typ, count, _) => {
            TagValue::Text(format!("<unknown type {} x{}>", typ, count))
        }
        _ => TagValue::Text(format!("{:?}", value)),
    }
}
