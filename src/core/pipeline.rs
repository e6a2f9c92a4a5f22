use crate::core::file_builder::build_file;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{AudienceFile, BatchConfig, ExportBatch};
use crate::utils::error::Result;
use crate::utils::validation::{validate_delimiter, validate_filename};

/// Pipeline that reads a batch JSON document from storage, builds the
/// delimited audience file, and writes it back out through the same storage.
pub struct FileExportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FileExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Resolves batch settings: explicit config overrides win, otherwise the
    /// first payload's delimiter and filename apply to the whole batch.
    fn resolve_batch_config(&self, batch: &ExportBatch) -> Result<BatchConfig> {
        let mut config = BatchConfig::from_first_payload(&batch.payloads)?;

        if let Some(delimiter) = self.config.delimiter_override() {
            config.delimiter = delimiter.to_string();
        }
        if let Some(filename) = self.config.filename_override() {
            config.filename = filename.to_string();
        }

        validate_delimiter("delimiter", &config.delimiter)?;
        validate_filename("filename", &config.filename)?;

        Ok(config)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FileExportPipeline<S, C> {
    async fn extract(&self) -> Result<ExportBatch> {
        tracing::debug!("Reading batch from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        let batch: ExportBatch = serde_json::from_slice(&data)?;

        tracing::debug!(
            payloads = batch.payloads.len(),
            raw_records = batch.raw_records.len(),
            "batch parsed"
        );
        Ok(batch)
    }

    async fn transform(&self, batch: ExportBatch) -> Result<AudienceFile> {
        let config = self.resolve_batch_config(&batch)?;
        build_file(&config, &batch.payloads, &batch.raw_records)
    }

    async fn load(&self, file: AudienceFile) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), file.filename);

        tracing::debug!(
            "Writing audience file ({} bytes) to storage",
            file.contents.len()
        );
        self.storage.write_file(&output_path, &file.contents).await?;

        Ok(output_path)
    }
}
