//! PDF document-info mapping.
//!
//! The document-info dictionary carries a handful of standard keys. Known
//! keys get human labels and come first, in table order; date-valued ones
//! are reformatted. Every other key follows under its own name, in source
//! order.

use crate::value::OrderedMap;

/// Known document-info keys and their display labels.
pub const PDF_FIELDS: &[(&str, &str)] = &[
    ("Title", "Title"),
    ("Author", "Author"),
    ("Subject", "Subject"),
    ("Creator", "Creator"),
    ("Producer", "Producer"),
    ("CreationDate", "Creation Date"),
    ("ModDate", "Modification Date"),
    ("Keywords", "Keywords"),
];

/// Map a raw document-info dictionary to labelled display fields.
pub fn map_pdf_metadata(raw: &OrderedMap<String>) -> OrderedMap<String> {
    let mut mapped = OrderedMap::new();

    for (key, label) in PDF_FIELDS {
        if let Some(value) = raw.get(key) {
            let value = if label.contains("Date") {
                format_pdf_date(value)
            } else {
                value.clone()
            };
            mapped.insert(*label, value);
        }
    }

    for (key, value) in raw.iter() {
        if !PDF_FIELDS.iter().any(|(known, _)| *known == key) {
            mapped.insert(key, value.clone());
        }
    }

    mapped
}

/// Reformat a PDF date string (`D:YYYYMMDDHHmmSS...`) as `YYYY-MM-DD HH:MM`.
///
/// Empty input yields `N/A`. Anything that isn't a well-formed date of at
/// least 16 characters is returned unchanged.
pub fn format_pdf_date(date: &str) -> String {
    if date.is_empty() {
        return "N/A".to_string();
    }
    if date.len() < 16 {
        return date.to_string();
    }
    let Some(digits) = date.strip_prefix("D:").and_then(|rest| rest.get(..12)) else {
        return date.to_string();
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return date.to_string();
    }
    format!(
        "{}-{}-{} {}:{}",
        &digits[0..4],
        &digits[4..6],
        &digits[6..8],
        &digits[8..10],
        &digits[10..12]
    )
}
