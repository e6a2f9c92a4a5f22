use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting audience export...");

        tracing::info!("Extracting batch...");
        let batch = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} payloads and {} raw records",
            batch.payloads.len(),
            batch.raw_records.len()
        );

        tracing::info!("Building audience file...");
        let file = self.pipeline.transform(batch).await?;
        tracing::info!(
            "Built {} ({} bytes)",
            file.filename,
            file.contents.len()
        );

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(file).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
