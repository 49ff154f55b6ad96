//! Display formatting for raw tag values.
//!
//! [`format_value`] turns a `(tag name, value)` pair into the string shown
//! in reports. Rules are tried in order and the first match wins:
//!
//! 1. `ExposureTime` rational → `"{num}/{den} sec"` (denominator unchecked)
//! 2. `FNumber` rational, non-zero denominator → `"f/{ratio:.1}"`
//! 3. `FocalLength` rational, non-zero denominator → `"{ratio:.1} mm"`
//! 4. Byte blob → decoded UTF-8 text, or `"<binary data: N bytes>"`
//! 5. Sequence or mapping → generic form, truncated
//! 6. Anything else → generic form, truncated
//!
//! A zero-denominator `FNumber`/`FocalLength` is not an error: it simply
//! falls through to the generic rules and renders as `"4/0"`.

use crate::value::TagValue;

/// Longest display string kept intact.
pub const MAX_DISPLAY_LEN: usize = 100;

const ELLIPSIS: &str = "...";

/// Format one tag value for display.
pub fn format_value(tag: &str, value: &TagValue) -> String {
    if let Some((num, den)) = value.as_rational() {
        match tag {
            "ExposureTime" => return format!("{}/{} sec", num, den),
            "FNumber" if den != 0 => return format!("f/{:.1}", num as f64 / den as f64),
            "FocalLength" if den != 0 => return format!("{:.1} mm", num as f64 / den as f64),
            _ => {}
        }
    }

    match value {
        TagValue::Bytes(bytes) => decode_bytes(bytes),
        _ => truncate_display(&value.to_string()),
    }
}

/// Decode a byte blob as UTF-8, skipping invalid sequences.
///
/// Only a non-empty blob with no valid text in it at all counts as binary.
fn decode_bytes(bytes: &[u8]) -> String {
    let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
    if text.is_empty() && !bytes.is_empty() {
        format!("<binary data: {} bytes>", bytes.len())
    } else {
        text
    }
}

/// Keep strings of up to [`MAX_DISPLAY_LEN`] characters; cut longer ones to
/// 97 characters plus `...`.
pub fn truncate_display(text: &str) -> String {
    if text.chars().count() <= MAX_DISPLAY_LEN {
        return text.to_string();
    }
    let keep = MAX_DISPLAY_LEN - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
