use crate::core::hash::hash_identifier;
use crate::core::normalize::normalize;
use crate::core::quote::enquote;
use crate::domain::model::{AudienceFile, BatchConfig, Payload, RawRecord};
use crate::utils::error::{ExportError, Result};
use serde_json::Value;
use std::collections::HashSet;

/// Insertion-ordered, duplicate-free collection of output column names.
/// Always seeded with the contact column `email`.
#[derive(Debug)]
pub struct HeaderSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        let mut headers = Self {
            names: Vec::new(),
            seen: HashSet::new(),
        };
        headers.insert("email");
        headers
    }

    /// Adds a column name unless it is already present. Returns whether the
    /// name was newly added.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn join(&self, delimiter: &str) -> String {
        self.names.join(delimiter)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for HeaderSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the delimited ingestion file for one batch.
///
/// Every raw record becomes one row, built from a merged view of the record
/// and the batch's representative payload (`payloads[0]`); payload fields win
/// on collision and the inputs are never mutated. Each row starts with the
/// enquoted contact email, followed by the normalized-and-hashed
/// `unhashed_identifier_data` values, then the cleartext `identifier_data`
/// values whose keys have not been emitted under any earlier column.
///
/// The header line lists the discovered columns joined by the batch
/// delimiter; rows are separated by `\n` with no trailing newline. Rows are
/// deliberately not padded to the header width: once a cleartext key has
/// entered the header set, later records skip it, matching the legacy file
/// format byte for byte.
pub fn build_file(
    batch: &BatchConfig,
    payloads: &[Payload],
    raw_records: &[RawRecord],
) -> Result<AudienceFile> {
    let payload = payloads
        .first()
        .ok_or(ExportError::EmptyBatchError { which: "payloads" })?;

    if raw_records.is_empty() {
        return Err(ExportError::EmptyBatchError {
            which: "raw_records",
        });
    }

    let mut headers = HeaderSet::new();
    let mut rows: Vec<u8> = Vec::new();

    for (index, record) in raw_records.iter().enumerate() {
        // Merged view: the payload layers over the raw record.
        let email = payload
            .email
            .as_deref()
            .or(record.email.as_deref())
            .unwrap_or("");

        let mut row: Vec<String> = vec![enquote(email)];

        for (key, value) in &payload.unhashed_identifier_data {
            headers.insert(key);
            let digest = hash_identifier(&normalize(key, &stringify(value)));
            // Hashed fields keep the legacy literal-quote wrapping. Digests
            // are hex, so there is nothing to escape.
            row.push(format!("\"{digest}\""));
        }

        for (key, value) in &payload.identifier_data {
            // A key already emitted under any column (on this or an earlier
            // record) is skipped, first-seen-wins.
            if headers.contains(key) {
                continue;
            }
            headers.insert(key);
            row.push(enquote(&stringify(value)));
        }

        rows.extend_from_slice(row.join(&batch.delimiter).as_bytes());
        if index + 1 != raw_records.len() {
            rows.push(b'\n');
        }
    }

    let mut contents = headers.join(&batch.delimiter).into_bytes();
    contents.push(b'\n');
    contents.extend_from_slice(&rows);

    tracing::debug!(
        filename = %batch.filename,
        columns = headers.len(),
        records = raw_records.len(),
        bytes = contents.len(),
        "built audience file"
    );

    Ok(AudienceFile {
        filename: batch.filename.clone(),
        contents,
    })
}

/// String form of a JSON identifier value. Scalars render as their plain
/// text; null renders as the empty string rather than the literal "null".
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
