pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_delimiter, validate_filename, validate_path, Validate};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "audience-etl")]
#[command(about = "A small ETL tool for building audience activation files")]
pub struct CliConfig {
    /// Batch JSON document carrying payloads and raw records
    #[arg(long, default_value = "./batch.json")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Override the batch delimiter instead of reading it from the first payload
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Override the output filename instead of reading it from the first payload
    #[arg(long)]
    pub filename: Option<String>,

    /// TOML job file; takes over input/output/batch settings when given
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs (for cron/container runs)")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter_override(&self) -> Option<&str> {
        self.delimiter.as_deref()
    }

    fn filename_override(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_path", &self.output_path)?;

        if let Some(delimiter) = &self.delimiter {
            validate_delimiter("delimiter", delimiter)?;
        }
        if let Some(filename) = &self.filename {
            validate_filename("filename", filename)?;
        }

        Ok(())
    }
}
