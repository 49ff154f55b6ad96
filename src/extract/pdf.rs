//! PDF extraction via `lopdf`: page count and the document-info dictionary.

use super::{ExtractError, Extractor, basic_info};
use crate::record::{ContainerInfo, MetadataRecord, PdfInfo};
use crate::value::OrderedMap;
use log::debug;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

const BOM: char = '\u{feff}';

/// Reads PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<MetadataRecord, ExtractError> {
        let doc = Document::load(path).map_err(|e| ExtractError::CorruptContainer(e.to_string()))?;
        let num_pages = doc.get_pages().len();
        let raw = info_dictionary(&doc)
            .map(|dict| read_info(&doc, dict))
            .unwrap_or_default();
        debug!(
            "{}: {} pages, {} info entries",
            path.display(),
            num_pages,
            raw.len()
        );

        let basic = basic_info(path, ContainerInfo::Pdf(PdfInfo { num_pages }))?;
        Ok(MetadataRecord::from_pdf(basic, &raw))
    }
}

/// The trailer's `/Info` dictionary, direct or by reference.
fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        _ => None,
    }
}

fn read_info(doc: &Document, dict: &Dictionary) -> OrderedMap<String> {
    dict.iter()
        .map(|(key, value)| {
            let value = match value {
                Object::Reference(id) => doc
                    .get_object(*id)
                    .map(object_text)
                    .unwrap_or_default(),
                other => object_text(other),
            };
            (String::from_utf8_lossy(key).into_owned(), value)
        })
        .collect()
}

fn object_text(object: &Object) -> String {
    match object {
        Object::String(bytes, _) => match lopdf::decode_text_string(object) {
            Ok(text) => text.trim_start_matches(BOM).to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        Object::Name(name) => String::from_utf8_lossy(name).into_owned(),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => r.to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Null => "null".to_string(),
        Object::Array(items) => {
            let parts: Vec<String> = items.iter().map(object_text).collect();
            format!("[{}]", parts.join(", "))
        }
        other => format!("{:?}", other),
    }
}
