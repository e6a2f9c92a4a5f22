pub mod engine;
pub mod file_builder;
pub mod hash;
pub mod normalize;
pub mod pipeline;
pub mod quote;

pub use crate::domain::model::{AudienceFile, BatchConfig, ExportBatch, Payload, RawRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
