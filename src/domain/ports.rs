use crate::domain::model::{AudienceFile, ExportBatch};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;

    /// Batch delimiter override; `None` derives it from the first payload.
    fn delimiter_override(&self) -> Option<&str>;

    /// Output filename override; `None` derives it from the first payload.
    fn filename_override(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExportBatch>;
    async fn transform(&self, batch: ExportBatch) -> Result<AudienceFile>;
    async fn load(&self, file: AudienceFile) -> Result<String>;
}
