#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use build_cost_estimator::adapters::s3::S3ProfileSource;
#[cfg(feature = "lambda")]
use build_cost_estimator::config::lambda::{LambdaConfig, LambdaReferenceSource};
#[cfg(feature = "lambda")]
use build_cost_estimator::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use build_cost_estimator::{
    CostOrchestrator, EstimateError, EstimateReply, EstimateRequest, NeighborhoodProfileProvider,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Serialize;
#[cfg(feature = "lambda")]
use std::collections::HashMap;
#[cfg(feature = "lambda")]
use std::sync::Arc;

/// API Gateway proxy response.
#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
type SharedOrchestrator = Arc<CostOrchestrator<Box<dyn NeighborhoodProfileProvider>>>;

/// Accepts an API Gateway proxy event (`body` holds the JSON request) or the
/// bare request object.
#[cfg(feature = "lambda")]
fn request_from_event(payload: serde_json::Value) -> Result<EstimateRequest, EstimateError> {
    match payload.get("body") {
        Some(serde_json::Value::String(body)) => EstimateRequest::from_json(body),
        Some(serde_json::Value::Null) | None => EstimateRequest::from_value(payload),
        Some(other) => EstimateRequest::from_value(other.clone()),
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(
    orchestrator: SharedOrchestrator,
    event: LambdaEvent<serde_json::Value>,
) -> Result<Response, Error> {
    tracing::info!("Handling estimate request {}", event.context.request_id);

    let reply = match request_from_event(event.payload) {
        Ok(request) => orchestrator.handle(&request).await,
        Err(e) => EstimateReply::failure(&e),
    };

    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    Ok(Response {
        status_code: reply.status_code,
        headers,
        body: serde_json::to_string(&reply.body)?,
    })
}

#[cfg(feature = "lambda")]
async fn build_provider(
    lambda_config: &LambdaConfig,
) -> Result<Box<dyn NeighborhoodProfileProvider>, Error> {
    match lambda_config.reference_source {
        LambdaReferenceSource::S3 => {
            // 創建AWS配置和S3客戶端
            let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
            let region = Region::new(lambda_config.s3_region.clone());
            let config = aws_sdk_s3::config::Builder::from(&config)
                .region(region)
                .force_path_style(true)
                .build();
            let s3_client = S3Client::from_conf(config);

            let bucket = lambda_config.s3_bucket.clone().unwrap_or_default();
            let source = S3ProfileSource::new(s3_client, bucket, lambda_config.s3_key.clone());
            Ok(Box::new(source.load().await?))
        }
        LambdaReferenceSource::Http => {
            let reference = lambda_config
                .http_reference()
                .ok_or_else(|| EstimateError::MissingConfigError {
                    field: "REFERENCE_ENDPOINT".to_string(),
                })?;
            Ok(reference.build_provider()?)
        }
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    // 冷啟動時載入一次參考資料
    let provider = build_provider(&lambda_config).await?;
    let orchestrator: SharedOrchestrator = Arc::new(CostOrchestrator::new(provider));

    run(service_fn(move |event| {
        let orchestrator = Arc::clone(&orchestrator);
        async move { function_handler(orchestrator, event).await }
    }))
    .await
}
