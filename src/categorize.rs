//! Tag categorization: camera identity, capture settings, everything else.
//!
//! Membership is a fixed lookup against two name lists. The split is a
//! partition: every input tag lands in exactly one bucket, and each bucket
//! keeps the order tags had in the source map.

use crate::value::TagMap;
use serde::Serialize;

/// Tags describing the capturing device.
pub const CAMERA_TAGS: &[&str] = &["Make", "Model", "LensMake", "LensModel", "Software"];

/// Tags describing how the shot was taken.
pub const SETTINGS_TAGS: &[&str] = &[
    "DateTime",
    "DateTimeOriginal",
    "DateTimeDigitized",
    "ExposureTime",
    "FNumber",
    "ISO",
    "ISOSpeedRatings",
    "FocalLength",
    "Flash",
    "WhiteBalance",
    "ExposureMode",
    "MeteringMode",
    "ExposureProgram",
];

/// A raw tag map split into three disjoint buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedTags {
    pub camera_info: TagMap,
    pub settings_info: TagMap,
    pub other_tags: TagMap,
}

impl CategorizedTags {
    pub fn is_empty(&self) -> bool {
        self.camera_info.is_empty() && self.settings_info.is_empty() && self.other_tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.camera_info.len() + self.settings_info.len() + self.other_tags.len()
    }
}

/// Which bucket a tag name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Camera,
    Settings,
    Other,
}

pub fn category_of(tag: &str) -> TagCategory {
    if CAMERA_TAGS.contains(&tag) {
        TagCategory::Camera
    } else if SETTINGS_TAGS.contains(&tag) {
        TagCategory::Settings
    } else {
        TagCategory::Other
    }
}

/// Partition `tags` into camera, settings and other buckets.
pub fn categorize_tags(tags: TagMap) -> CategorizedTags {
    let mut out = CategorizedTags::default();
    for (name, value) in tags {
        let bucket = match category_of(&name) {
            TagCategory::Camera => &mut out.camera_info,
            TagCategory::Settings => &mut out.settings_info,
            TagCategory::Other => &mut out.other_tags,
        };
        bucket.insert(name, value);
    }
    out
}
