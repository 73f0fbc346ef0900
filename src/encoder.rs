//! JSON encoding
//!
//! Summaries are written as JSON indented with four spaces, without a trailing
//! newline. Existing files are overwritten in place.

use crate::error::ComputeError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

/// Indentation used for every summary file
pub const INDENT: &[u8] = b"    ";

/// Encoder for summary documents
pub struct JsonEncoder {
    indent: &'static [u8],
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self { indent: INDENT }
    }

    /// Encode a document to an indented JSON string
    pub fn encode<T: Serialize + ?Sized>(&self, document: &T) -> Result<String, ComputeError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        document.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }

    /// Encode a document and write it to `path`, replacing any existing file
    pub fn write_to<T: Serialize + ?Sized>(
        &self,
        document: &T,
        path: &Path,
    ) -> Result<(), ComputeError> {
        let json = self.encode(document)?;
        fs::write(path, json).map_err(|e| ComputeError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BvpRecord, DeviceDocument};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_four_space_indent() {
        let doc = vec![BvpRecord {
            participant_id: 11,
            avg_bvp: 2.0,
        }];
        let json = JsonEncoder::new().encode(&doc).unwrap();
        let expected = "[\n    {\n        \"participant_id\": 11,\n        \"avg_bvp\": 2.0\n    }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_flat_document() {
        let doc: Vec<BvpRecord> = Vec::new();
        assert_eq!(JsonEncoder::new().encode(&doc).unwrap(), "[]");
    }

    #[test]
    fn test_nested_document_indent() {
        let json = JsonEncoder::new().encode(&DeviceDocument::new()).unwrap();
        assert!(json.starts_with("{\n    \"empatica_bvp\": {\n        \"post\": {\n            \"baseline\": []"));
        assert!(!json.ends_with('\n'));
    }

    #[test]
    fn test_non_finite_average_encodes_as_null() {
        let doc = vec![BvpRecord {
            participant_id: 11,
            avg_bvp: f64::NAN,
        }];
        let value: serde_json::Value =
            serde_json::from_str(&JsonEncoder::new().encode(&doc).unwrap()).unwrap();
        assert!(value[0]["avg_bvp"].is_null());
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale contents that are longer than the new file").unwrap();

        let doc: Vec<BvpRecord> = Vec::new();
        JsonEncoder::new().write_to(&doc, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let doc: Vec<BvpRecord> = Vec::new();
        let err = JsonEncoder::new().write_to(&doc, &path).unwrap_err();
        assert!(matches!(err, ComputeError::WriteFailed { .. }));
    }
}
