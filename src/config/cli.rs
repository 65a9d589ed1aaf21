use crate::config::toml_config::{EstimatorConfig, ReferenceDataConfig};
use crate::core::Storage;
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "estimate")]
#[command(about = "Estimate the construction cost of a building on a parcel")]
pub struct CliConfig {
    /// JSON request file, or `-` to read it from stdin
    #[arg(long, default_value = "-")]
    pub request: String,

    /// CSV file with the neighborhood reference data
    #[arg(long)]
    pub profiles: Option<String>,

    /// Reference-data endpoint (`{id}` is replaced by the neighborhood id)
    #[arg(long)]
    pub reference_endpoint: Option<String>,

    /// TOML configuration providing the `[reference_data]` section
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Pretty-print the JSON response")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the reference-data source from the flags, in order:
    /// `--config`, `--profiles`, `--reference-endpoint`.
    pub fn reference_data(&self) -> Result<ReferenceDataConfig> {
        if let Some(path) = &self.config {
            return Ok(EstimatorConfig::from_file(path)?.reference_data);
        }
        if let Some(path) = &self.profiles {
            return Ok(ReferenceDataConfig::csv(path.clone()));
        }
        if let Some(endpoint) = &self.reference_endpoint {
            return Ok(ReferenceDataConfig::http(endpoint.clone(), self.timeout_seconds));
        }
        Err(EstimateError::MissingConfigError {
            field: "--profiles | --reference-endpoint | --config".to_string(),
        })
    }

    pub fn read_request(&self) -> Result<String> {
        if self.request == "-" {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        } else {
            Ok(fs::read_to_string(&self.request)?)
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("request", &self.request)?;

        let sources = [
            self.config.is_some(),
            self.profiles.is_some(),
            self.reference_endpoint.is_some(),
        ];
        if sources.iter().filter(|set| **set).count() > 1 {
            return Err(EstimateError::ConfigError {
                message: "use only one of --config, --profiles, --reference-endpoint".to_string(),
            });
        }

        if let Some(endpoint) = &self.reference_endpoint {
            validation::validate_url("reference_endpoint", endpoint)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
