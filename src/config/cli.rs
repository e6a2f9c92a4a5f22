use crate::core::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;
use tokio::fs;

/// Filesystem adapter for batch input and audience file output. Paths are
/// resolved against a base directory so pipelines stay relocatable between
/// a working directory and a temp dir in tests.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        Self {
            // An empty base would silently resolve against whatever the
            // process cwd happens to be; pin it to "." explicitly.
            base_path: if base_path.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                base_path
            },
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        fs::write(full_path, data).await?;
        Ok(())
    }
}
