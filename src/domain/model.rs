use crate::utils::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One platform record configuration as received from the activation API.
///
/// `unhashed_identifier_data` values must be normalized and hashed before they
/// leave the system; `identifier_data` values are included in cleartext.
/// Both maps keep their wire insertion order (`serde_json` with
/// `preserve_order`), which determines column order in the output file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub unhashed_identifier_data: Map<String, Value>,

    #[serde(default)]
    pub identifier_data: Map<String, Value>,

    /// Single-character field separator for this batch.
    pub delimiter: String,

    /// Name of the file the platform expects to receive.
    pub filename: String,

    /// Audience node id in the destination taxonomy (pass-through).
    #[serde(default)]
    pub segment_audience_id: Option<String>,

    /// Audience node name in the destination taxonomy (pass-through).
    #[serde(default)]
    pub segment_audience_key: Option<String>,

    // Batching hints consumed by the upload layer, not by this crate.
    #[serde(default)]
    pub enable_batching: Option<bool>,

    #[serde(default)]
    pub batch_size: Option<u64>,
}

/// Upstream event metadata for one output row. Before the merge it usually
/// carries only a context-derived identity (an email); everything else comes
/// from the representative payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub context: Option<RecordContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordContext {
    #[serde(default)]
    pub personas: Option<Personas>,
}

/// Audience computation descriptor, passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Personas {
    #[serde(default)]
    pub computation_key: Option<String>,

    #[serde(default)]
    pub computation_class: Option<String>,

    #[serde(default)]
    pub computation_id: Option<String>,
}

/// One extracted unit of work: the payloads and raw records of a single batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBatch {
    pub payloads: Vec<Payload>,
    pub raw_records: Vec<RawRecord>,
}

/// Batch-level output settings. One delimiter and one filename apply to the
/// whole batch; they are explicit configuration rather than something read
/// off an arbitrary record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub delimiter: String,
    pub filename: String,
}

impl BatchConfig {
    pub fn new(delimiter: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            filename: filename.into(),
        }
    }

    /// Derives batch settings from the first payload, for callers that only
    /// hold the wire shape. Fails on an empty payload list.
    pub fn from_first_payload(payloads: &[Payload]) -> Result<Self> {
        let payload = payloads
            .first()
            .ok_or(ExportError::EmptyBatchError { which: "payloads" })?;

        Ok(Self {
            delimiter: payload.delimiter.clone(),
            filename: payload.filename.clone(),
        })
    }
}

/// Finished output: a named byte buffer ready for the upload layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceFile {
    pub filename: String,
    pub contents: Vec<u8>,
}

impl AudienceFile {
    /// The file body as UTF-8 text. Contents are built from strings, so this
    /// never fails for files produced by this crate.
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_config_from_first_payload() {
        let payloads = vec![
            Payload {
                delimiter: ",".to_string(),
                filename: "audience.csv".to_string(),
                ..Default::default()
            },
            Payload {
                delimiter: "|".to_string(),
                filename: "ignored.csv".to_string(),
                ..Default::default()
            },
        ];

        let config = BatchConfig::from_first_payload(&payloads).unwrap();
        assert_eq!(config.delimiter, ",");
        assert_eq!(config.filename, "audience.csv");
    }

    #[test]
    fn test_batch_config_empty_payloads() {
        let result = BatchConfig::from_first_payload(&[]);
        assert!(matches!(
            result,
            Err(ExportError::EmptyBatchError { which: "payloads" })
        ));
    }

    #[test]
    fn test_payload_deserializes_with_missing_optional_fields() {
        let json = r#"{"delimiter": ",", "filename": "out.csv"}"#;
        let payload: Payload = serde_json::from_str(json).unwrap();

        assert!(payload.email.is_none());
        assert!(payload.unhashed_identifier_data.is_empty());
        assert!(payload.identifier_data.is_empty());
    }

    #[test]
    fn test_identifier_data_preserves_insertion_order() {
        let json = r#"{
            "delimiter": ",",
            "filename": "out.csv",
            "identifier_data": {"zeta": "1", "alpha": "2", "mid": "3"}
        }"#;
        let payload: Payload = serde_json::from_str(json).unwrap();

        let keys: Vec<&String> = payload.identifier_data.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_raw_record_personas_passthrough() {
        let json = r#"{
            "email": "user@example.com",
            "context": {"personas": {"computation_key": "aud_key", "computation_id": "aud_1"}}
        }"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();

        let personas = record.context.unwrap().personas.unwrap();
        assert_eq!(personas.computation_key.as_deref(), Some("aud_key"));
        assert_eq!(personas.computation_id.as_deref(), Some("aud_1"));
        assert!(personas.computation_class.is_none());
    }
}
