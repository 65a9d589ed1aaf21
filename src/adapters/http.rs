use crate::adapters::csv_store::parse_coefficient;
use crate::domain::model::{NeighborhoodId, NeighborhoodProfile};
use crate::domain::ports::NeighborhoodProfileProvider;
use crate::domain::request::TextOrNumber;
use crate::utils::error::{EstimateError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Fields of the reference-data record; the price bands sent alongside the
/// coefficient are not read.
#[derive(Debug, Deserialize)]
struct ProfilePayload {
    coefficient_occupa_sols: Option<TextOrNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileEnvelope {
    Wrapped { data: ProfilePayload },
    Bare(ProfilePayload),
}

/// Reads profiles from the marketplace reference-data endpoint.
///
/// The endpoint may contain an `{id}` placeholder; otherwise the id is
/// appended as the last path segment.
#[derive(Debug, Clone)]
pub struct HttpProfileProvider {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpProfileProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(timeout_seconds));
        self
    }

    pub fn profile_url(&self, id: &NeighborhoodId) -> String {
        // 路徑片段編碼：空白為 %20，`/` 也要跳脫
        let encoded = urlencoding::encode(id.as_str());
        if self.endpoint.contains("{id}") {
            self.endpoint.replace("{id}", &encoded)
        } else {
            format!("{}/{}", self.endpoint.trim_end_matches('/'), encoded)
        }
    }
}

#[async_trait]
impl NeighborhoodProfileProvider for HttpProfileProvider {
    async fn fetch_profile(&self, id: &NeighborhoodId) -> Result<NeighborhoodProfile> {
        let url = self.profile_url(id);
        tracing::debug!("📡 Requesting reference profile: {}", url);

        let mut request = self.client.get(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        tracing::debug!("📡 Reference data response status: {}", response.status());

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(EstimateError::NotFound {
                neighborhood_id: id.to_string(),
            });
        }
        if !status.is_success() {
            return Err(EstimateError::ReferenceDataError {
                message: format!("reference data request failed with status: {}", status),
            });
        }

        let payload = match response.json::<Option<ProfileEnvelope>>().await? {
            Some(ProfileEnvelope::Wrapped { data }) | Some(ProfileEnvelope::Bare(data)) => data,
            // `null` body: the service answers 200 for unknown ids
            None => {
                return Err(EstimateError::NotFound {
                    neighborhood_id: id.to_string(),
                })
            }
        };

        let raw = payload.coefficient_occupa_sols.map(|c| c.to_text());
        let coefficient = parse_coefficient(id, raw.as_deref())?;
        NeighborhoodProfile::new(id.clone(), coefficient)
    }

    fn source_name(&self) -> &str {
        &self.endpoint
    }
}
