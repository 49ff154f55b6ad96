//! GPS tag decoding and degree conversion.
//!
//! EXIF stores positions as sexagesimal triples (degrees, minutes, seconds)
//! plus a hemisphere reference (`N`/`S`, `E`/`W`). This module converts them
//! to signed decimal degrees.
//!
//! GPS data is optional metadata: a malformed triple produces `None` for that
//! axis, never an error. Latitude and longitude are computed independently.

use crate::value::{TagMap, TagValue, fmt_float};
use serde::Serialize;

const LATITUDE: &str = "GPSLatitude";
const LATITUDE_REF: &str = "GPSLatitudeRef";
const LONGITUDE: &str = "GPSLongitude";
const LONGITUDE_REF: &str = "GPSLongitudeRef";

/// The four tags consumed by coordinate conversion.
pub const COORDINATE_TAGS: &[&str] = &[LATITUDE, LONGITUDE, LATITUDE_REF, LONGITUDE_REF];

/// Decimal-degree position. Either axis may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GpsCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GpsCoordinates {
    /// Both axes, or nothing.
    pub fn pair(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn maps_link(&self) -> Option<String> {
        maps_link(self.latitude, self.longitude)
    }
}

/// Result of decoding a raw GPS sub-directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsParse {
    /// GPS tags keyed by name (or numeric id when unknown), in source order.
    pub tags: TagMap,
    pub coordinates: GpsCoordinates,
}

/// Convert a `(degrees, minutes, seconds)` triple to decimal degrees.
///
/// Negated for the southern and western hemispheres. Returns `None` when the
/// value has fewer than three elements or an element isn't numeric.
pub fn convert_dms_to_dd(dms: &TagValue, reference: &str) -> Option<f64> {
    let TagValue::Sequence(parts) = dms else {
        return None;
    };
    let [degrees, minutes, seconds] = match parts.as_slice() {
        [d, m, s, ..] => [d.to_f64()?, m.to_f64()?, s.to_f64()?],
        _ => return None,
    };

    let dd = degrees + minutes / 60.0 + seconds / 3600.0;
    if matches!(reference.trim(), "S" | "W") {
        Some(-dd)
    } else {
        Some(dd)
    }
}

/// Name the raw GPS entries and compute coordinates.
///
/// `resolve` maps a numeric GPS tag id to its name; ids it doesn't know are
/// kept under their decimal string.
pub fn parse_gps<F>(raw: &[(u16, TagValue)], resolve: F) -> GpsParse
where
    F: Fn(u16) -> Option<String>,
{
    let tags: TagMap = raw
        .iter()
        .map(|(id, value)| (resolve(*id).unwrap_or_else(|| id.to_string()), value.clone()))
        .collect();

    let coordinates = GpsCoordinates {
        latitude: axis(&tags, LATITUDE, LATITUDE_REF),
        longitude: axis(&tags, LONGITUDE, LONGITUDE_REF),
    };

    GpsParse { tags, coordinates }
}

fn axis(tags: &TagMap, value_tag: &str, ref_tag: &str) -> Option<f64> {
    let dms = tags.get(value_tag)?;
    let reference = tags.get(ref_tag)?;
    let reference = match reference {
        TagValue::Text(s) => s.clone(),
        other => other.to_string(),
    };
    convert_dms_to_dd(dms, &reference)
}

/// A Google Maps query link, only when both axes are known.
pub fn maps_link(latitude: Option<f64>, longitude: Option<f64>) -> Option<String> {
    let (lat, lon) = latitude.zip(longitude)?;
    Some(format!(
        "https://www.google.com/maps?q={},{}",
        fmt_float(lat),
        fmt_float(lon)
    ))
}
