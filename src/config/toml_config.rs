use crate::adapters::{csv_store, HttpProfileProvider, InMemoryProfileProvider};
use crate::domain::model::{NeighborhoodId, NeighborhoodProfile};
use crate::domain::ports::NeighborhoodProfileProvider;
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const BATCH_OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub service: ServiceConfig,
    pub reference_data: ReferenceDataConfig,
    pub batch: Option<BatchConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    Csv,
    Http,
    Inline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDataConfig {
    pub source: ReferenceSource,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub neighborhoods: Option<Vec<InlineNeighborhood>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineNeighborhood {
    pub id: String,
    pub coefficient_occupa_sols: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub input: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

impl ReferenceDataConfig {
    pub fn csv(path: impl Into<String>) -> Self {
        Self {
            source: ReferenceSource::Csv,
            path: Some(path.into()),
            endpoint: None,
            timeout_seconds: None,
            neighborhoods: None,
        }
    }

    pub fn http(endpoint: impl Into<String>, timeout_seconds: Option<u64>) -> Self {
        Self {
            source: ReferenceSource::Http,
            path: None,
            endpoint: Some(endpoint.into()),
            timeout_seconds,
            neighborhoods: None,
        }
    }

    /// Opens the configured source. CSV and inline data are read eagerly.
    pub fn build_provider(&self) -> Result<Box<dyn NeighborhoodProfileProvider>> {
        match self.source {
            ReferenceSource::Csv => {
                let path = validation::validate_required_config("reference_data.path", &self.path)?;
                Ok(Box::new(csv_store::load_profiles_from_path(path)?))
            }
            ReferenceSource::Http => {
                let endpoint = validation::validate_required_config(
                    "reference_data.endpoint",
                    &self.endpoint,
                )?;
                let mut provider = HttpProfileProvider::new(endpoint.clone());
                if let Some(timeout) = self.timeout_seconds {
                    provider = provider.with_timeout(timeout);
                }
                Ok(Box::new(provider))
            }
            ReferenceSource::Inline => {
                let entries = validation::validate_required_config(
                    "reference_data.neighborhoods",
                    &self.neighborhoods,
                )?;
                let profiles = entries
                    .iter()
                    .map(|n| {
                        NeighborhoodProfile::new(
                            NeighborhoodId::new(n.id.as_str()),
                            n.coefficient_occupa_sols,
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Box::new(InMemoryProfileProvider::from_profiles(profiles)?))
            }
        }
    }
}

impl Validate for ReferenceDataConfig {
    fn validate(&self) -> Result<()> {
        match self.source {
            ReferenceSource::Csv => {
                let path = validation::validate_required_config("reference_data.path", &self.path)?;
                validation::validate_path("reference_data.path", path)
            }
            ReferenceSource::Http => {
                let endpoint = validation::validate_required_config(
                    "reference_data.endpoint",
                    &self.endpoint,
                )?;
                validation::validate_url("reference_data.endpoint", endpoint)?;
                if let Some(timeout) = self.timeout_seconds {
                    validation::validate_range("reference_data.timeout_seconds", timeout, 1, 300)?;
                }
                Ok(())
            }
            ReferenceSource::Inline => {
                let entries = validation::validate_required_config(
                    "reference_data.neighborhoods",
                    &self.neighborhoods,
                )?;
                validation::validate_positive_number(
                    "reference_data.neighborhoods",
                    entries.len(),
                    1,
                )
            }
        }
    }
}

impl BatchConfig {
    /// 預設併發數
    pub fn concurrent_requests(&self) -> usize {
        self.concurrent_requests.unwrap_or(5)
    }

    pub fn writes(&self, format: &str) -> bool {
        self.output_formats.iter().any(|f| f == format)
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("batch.input", &self.input)?;
        validation::validate_path("batch.output_path", &self.output_path)?;
        validation::validate_output_formats(
            "batch.output_formats",
            &self.output_formats,
            &BATCH_OUTPUT_FORMATS,
        )?;
        validation::validate_range("batch.concurrent_requests", self.concurrent_requests(), 1, 64)
    }
}

impl EstimatorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimateError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REFERENCE_API})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimateError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn batch(&self) -> Result<&BatchConfig> {
        self.batch.as_ref().ok_or_else(|| EstimateError::MissingConfigError {
            field: "batch".to_string(),
        })
    }
}

impl Validate for EstimatorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("service.name", &self.service.name)?;
        self.reference_data.validate()?;
        if let Some(batch) = &self.batch {
            batch.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const INLINE_CONFIG: &str = r#"
[service]
name = "estimator"
version = "1.0.0"

[reference_data]
source = "inline"

[[reference_data.neighborhoods]]
id = "1"
coefficient_occupa_sols = 60.0

[[reference_data.neighborhoods]]
id = "2"
coefficient_occupa_sols = 45.0

[batch]
input = "requests.json"
output_path = "./output"
output_formats = ["csv", "json"]
concurrent_requests = 4
"#;

    #[test]
    fn test_parse_inline_config() {
        let config = EstimatorConfig::from_toml_str(INLINE_CONFIG).unwrap();
        assert_eq!(config.service.name, "estimator");
        assert_eq!(config.reference_data.source, ReferenceSource::Inline);
        assert!(config.validate().is_ok());

        let batch = config.batch().unwrap();
        assert_eq!(batch.concurrent_requests(), 4);
        assert!(batch.writes("csv"));
        assert!(!config.verbose());
    }

    #[tokio::test]
    async fn test_inline_provider() {
        let config = EstimatorConfig::from_toml_str(INLINE_CONFIG).unwrap();
        let provider = config.reference_data.build_provider().unwrap();
        let profile = provider.fetch_profile(&NeighborhoodId::new("2")).await.unwrap();
        assert_eq!(profile.land_use_coefficient, 45.0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_REFERENCE_ENDPOINT", "https://reference.example.com/quartiers");

        let toml_content = r#"
[service]
name = "test"
version = "1.0"

[reference_data]
source = "http"
endpoint = "${TEST_REFERENCE_ENDPOINT}"
"#;

        let config = EstimatorConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.reference_data.endpoint.as_deref(),
            Some("https://reference.example.com/quartiers")
        );
        assert!(config.validate().is_ok());

        std::env::remove_var("TEST_REFERENCE_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[service]
name = "test"
version = "1.0"

[reference_data]
source = "http"
endpoint = "invalid-url"
"#;
        let config = EstimatorConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[service]
name = "test"
version = "1.0"

[reference_data]
source = "csv"

[batch]
input = "requests.json"
output_path = "./output"
output_formats = ["xlsx"]
"#;
        let config = EstimatorConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            EstimateError::MissingConfigError { ref field } if field == "reference_data.path"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(INLINE_CONFIG.as_bytes()).unwrap();

        let config = EstimatorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.service.version, "1.0.0");
    }
}
