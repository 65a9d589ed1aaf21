use crate::config::toml_config::ReferenceDataConfig;
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{self, Validate};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LambdaReferenceSource {
    S3,
    Http,
}

/// Lambda settings, read from the function environment.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub reference_source: LambdaReferenceSource,
    pub s3_bucket: Option<String>,
    pub s3_key: String,
    pub s3_region: String,
    pub reference_endpoint: Option<String>,
    pub timeout_seconds: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`LambdaConfig::from_env`] with an injectable lookup, for tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reference_source = match lookup("REFERENCE_SOURCE").as_deref() {
            None | Some("s3") => LambdaReferenceSource::S3,
            Some("http") => LambdaReferenceSource::Http,
            Some(other) => {
                return Err(EstimateError::InvalidConfigValueError {
                    field: "REFERENCE_SOURCE".to_string(),
                    value: other.to_string(),
                    reason: "expected 's3' or 'http'".to_string(),
                })
            }
        };

        Ok(Self {
            reference_source,
            s3_bucket: lookup("S3_BUCKET"),
            s3_key: lookup("S3_KEY").unwrap_or_else(|| "reference/quartiers.csv".to_string()),
            s3_region: lookup("S3_REGION").unwrap_or_else(|| "eu-west-3".to_string()),
            reference_endpoint: lookup("REFERENCE_ENDPOINT"),
            timeout_seconds: lookup("REFERENCE_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }

    /// HTTP settings as a reference-data config; `None` in S3 mode.
    pub fn http_reference(&self) -> Option<ReferenceDataConfig> {
        match self.reference_source {
            LambdaReferenceSource::Http => self
                .reference_endpoint
                .as_ref()
                .map(|endpoint| {
                    ReferenceDataConfig::http(endpoint.clone(), Some(self.timeout_seconds))
                }),
            LambdaReferenceSource::S3 => None,
        }
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        match self.reference_source {
            LambdaReferenceSource::S3 => {
                let bucket = validation::validate_required_config("S3_BUCKET", &self.s3_bucket)?;
                validate_s3_bucket_name("S3_BUCKET", bucket)?;
                validation::validate_non_empty_string("S3_KEY", &self.s3_key)?;
                validate_aws_region("S3_REGION", &self.s3_region)?;
            }
            LambdaReferenceSource::Http => {
                let endpoint = validation::validate_required_config(
                    "REFERENCE_ENDPOINT",
                    &self.reference_endpoint,
                )?;
                validation::validate_url("REFERENCE_ENDPOINT", endpoint)?;
            }
        }
        validation::validate_range("REFERENCE_TIMEOUT_SECONDS", self.timeout_seconds, 1, 30)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(EstimateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<LambdaConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LambdaConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_s3_defaults() {
        let config = config_from(&[("S3_BUCKET", "estimator-reference")]).unwrap();
        assert_eq!(config.reference_source, LambdaReferenceSource::S3);
        assert_eq!(config.s3_key, "reference/quartiers.csv");
        assert!(config.validate().is_ok());
        assert!(config.http_reference().is_none());
    }

    #[test]
    fn test_s3_requires_valid_bucket() {
        assert!(config_from(&[]).unwrap().validate().is_err());
        assert!(config_from(&[("S3_BUCKET", "Bad_Bucket")]).unwrap().validate().is_err());
    }

    #[test]
    fn test_http_mode() {
        let config = config_from(&[
            ("REFERENCE_SOURCE", "http"),
            ("REFERENCE_ENDPOINT", "https://reference.example.com/quartiers/{id}"),
            ("REFERENCE_TIMEOUT_SECONDS", "3"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_reference().unwrap().timeout_seconds, Some(3));
    }

    #[test]
    fn test_unknown_source_rejected() {
        assert!(config_from(&[("REFERENCE_SOURCE", "ftp")]).is_err());
    }
}
