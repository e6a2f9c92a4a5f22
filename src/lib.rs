pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::ExportJobConfig;
pub use core::{engine::ExportEngine, pipeline::FileExportPipeline};
pub use domain::model::{AudienceFile, BatchConfig, ExportBatch, Payload, RawRecord};
pub use utils::error::{ExportError, Result};
