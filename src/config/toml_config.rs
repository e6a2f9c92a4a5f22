use crate::core::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{
    validate_delimiter, validate_filename, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML-defined export job, for running the same batch shape on a schedule
/// without retyping CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJobConfig {
    pub job: JobConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub batch: Option<BatchOverrides>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOverrides {
    pub delimiter: Option<String>,
    pub filename: Option<String>,
}

impl ExportJobConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ExportError::ConfigError {
                message: format!(
                    "Cannot read config file '{}': {}",
                    path.as_ref().display(),
                    e
                ),
            })?;

        let processed_content = Self::substitute_env_vars(&content)?;
        let config: ExportJobConfig = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// Replaces `${VAR_NAME}` references with environment values; unset
    /// variables are left as-is so validation can report them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for ExportJobConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn delimiter_override(&self) -> Option<&str> {
        self.batch.as_ref().and_then(|b| b.delimiter.as_deref())
    }

    fn filename_override(&self) -> Option<&str> {
        self.batch.as_ref().and_then(|b| b.filename.as_deref())
    }
}

impl Validate for ExportJobConfig {
    fn validate(&self) -> Result<()> {
        if self.job.name.trim().is_empty() {
            return Err(ExportError::MissingConfigError {
                field: "job.name".to_string(),
            });
        }

        validate_path("input.path", &self.input.path)?;
        validate_path("output.path", &self.output.path)?;

        if let Some(batch) = &self.batch {
            if let Some(delimiter) = &batch.delimiter {
                validate_delimiter("batch.delimiter", delimiter)?;
            }
            if let Some(filename) = &batch.filename {
                validate_filename("batch.filename", filename)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[job]
name = "nightly-audience-export"
description = "Delimited audience file for the identity-matching platform"

[input]
path = "./batch.json"

[output]
path = "./output"

[batch]
delimiter = "|"
filename = "audience.psv"
"#;

    #[test]
    fn test_parse_full_job() {
        let config: ExportJobConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.job.name, "nightly-audience-export");
        assert_eq!(config.input_path(), "./batch.json");
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.delimiter_override(), Some("|"));
        assert_eq!(config.filename_override(), Some("audience.psv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_batch_section_is_optional() {
        let minimal = r#"
[job]
name = "minimal"

[input]
path = "./batch.json"

[output]
path = "./output"
"#;
        let config: ExportJobConfig = toml::from_str(minimal).unwrap();
        assert!(config.delimiter_override().is_none());
        assert!(config.filename_override().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AUDIENCE_ETL_TEST_OUTPUT", "/tmp/exports");
        let content = "path = \"${AUDIENCE_ETL_TEST_OUTPUT}\"";
        let substituted = ExportJobConfig::substitute_env_vars(content).unwrap();
        assert_eq!(substituted, "path = \"/tmp/exports\"");
        std::env::remove_var("AUDIENCE_ETL_TEST_OUTPUT");
    }

    #[test]
    fn test_unset_env_var_left_in_place() {
        let content = "path = \"${AUDIENCE_ETL_UNSET_VAR}\"";
        let substituted = ExportJobConfig::substitute_env_vars(content).unwrap();
        assert_eq!(substituted, content);
    }

    #[test]
    fn test_validate_rejects_bad_delimiter() {
        let mut config: ExportJobConfig = toml::from_str(SAMPLE).unwrap();
        config.batch.as_mut().unwrap().delimiter = Some("||".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_job_name() {
        let mut config: ExportJobConfig = toml::from_str(SAMPLE).unwrap();
        config.job.name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ExportError::MissingConfigError { .. })
        ));
    }
}
