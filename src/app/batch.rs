use crate::config::toml_config::BatchConfig;
use crate::core::orchestrator::CostOrchestrator;
use crate::domain::ports::{NeighborhoodProfileProvider, Storage};
use crate::domain::request::{EstimateReply, EstimateRequest, EstimateResponse};
use crate::utils::error::{EstimateError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const JSON_OUTPUT: &str = "estimates.json";
pub const CSV_OUTPUT: &str = "estimates.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub index: usize,
    pub status_code: u16,
    #[serde(flatten)]
    pub response: EstimateResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    index: usize,
    status_code: u16,
    success: bool,
    ouvrage: Option<&'static str>,
    standing: Option<&'static str>,
    superficie: Option<f64>,
    buildable_footprint_m2: Option<f64>,
    structural_cost: Option<f64>,
    finishing_cost: Option<f64>,
    total_cost: Option<f64>,
    error: Option<&'a str>,
}

/// Reads the batch input: a JSON array of estimate requests.
pub fn parse_requests(data: &[u8]) -> Result<Vec<serde_json::Value>> {
    match serde_json::from_slice::<serde_json::Value>(data)? {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(EstimateError::validation("batch.input", "expected a JSON array of requests")),
    }
}

/// Runs many requests through one shared orchestrator.
pub struct BatchEstimator<P: NeighborhoodProfileProvider + 'static> {
    orchestrator: Arc<CostOrchestrator<P>>,
    concurrent_requests: usize,
}

impl<P: NeighborhoodProfileProvider + 'static> BatchEstimator<P> {
    pub fn new(orchestrator: Arc<CostOrchestrator<P>>, concurrent_requests: usize) -> Self {
        Self {
            orchestrator,
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    /// Estimates every request; results keep the input order. A malformed
    /// item fails on its own with a 400 and does not stop the batch.
    pub async fn run(&self, requests: Vec<serde_json::Value>) -> Result<BatchReport> {
        let total = requests.len();
        tracing::info!(
            "🚀 Estimating {} requests ({} concurrent)",
            total,
            self.concurrent_requests
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrent_requests));
        let mut tasks = JoinSet::new();

        for (index, raw) in requests.into_iter().enumerate() {
            let orchestrator = Arc::clone(&self.orchestrator);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| EstimateError::internal(format!("semaphore closed: {}", e)))?;
                let reply = match EstimateRequest::from_value(raw) {
                    Ok(request) => orchestrator.handle(&request).await,
                    Err(e) => EstimateReply::failure(&e),
                };
                Ok::<_, EstimateError>(BatchItem {
                    index,
                    status_code: reply.status_code,
                    response: reply.body,
                })
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            let item = joined
                .map_err(|e| EstimateError::internal(format!("estimate task failed: {}", e)))??;
            results.push(item);
        }
        results.sort_by_key(|item| item.index);

        let succeeded = results.iter().filter(|item| item.response.success).count();
        tracing::info!("✅ Batch complete: {} succeeded, {} failed", succeeded, total - succeeded);

        Ok(BatchReport {
            generated_at: Utc::now(),
            total,
            succeeded,
            failed: total - succeeded,
            results,
        })
    }
}

pub fn to_json(report: &BatchReport) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

pub fn to_csv(report: &BatchReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for item in &report.results {
        let data = item.response.data.as_ref();
        writer.serialize(CsvRow {
            index: item.index,
            status_code: item.status_code,
            success: item.response.success,
            ouvrage: data.map(|d| d.building_category.as_str()),
            standing: data.map(|d| d.finish_tier.as_str()),
            superficie: data.map(|d| d.land_area_m2),
            buildable_footprint_m2: data.map(|d| d.breakdown.buildable_footprint_m2),
            structural_cost: data.map(|d| d.breakdown.structural_cost),
            finishing_cost: data.map(|d| d.breakdown.finishing_cost),
            total_cost: data.map(|d| d.breakdown.total_cost),
            error: item.response.error.as_deref(),
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| EstimateError::internal(format!("failed to flush CSV output: {}", e)))
}

/// Writes the formats selected in `[batch]` and returns the written file names.
pub async fn write_outputs<S: Storage>(
    report: &BatchReport,
    storage: &S,
    config: &BatchConfig,
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    if config.writes("json") {
        storage.write_file(JSON_OUTPUT, &to_json(report)?).await?;
        written.push(JSON_OUTPUT.to_string());
    }
    if config.writes("csv") {
        storage.write_file(CSV_OUTPUT, &to_csv(report)?).await?;
        written.push(CSV_OUTPUT.to_string());
    }

    tracing::debug!("Batch outputs written: {:?}", written);
    Ok(written)
}
