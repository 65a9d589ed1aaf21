use crate::domain::model::{NeighborhoodId, NeighborhoodProfile};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to the per-neighborhood reference data.
///
/// Implementations return `EstimateError::NotFound` when the id has no
/// profile. The estimator reads exactly one profile per estimate and never
/// caches it.
#[async_trait]
pub trait NeighborhoodProfileProvider: Send + Sync {
    async fn fetch_profile(&self, id: &NeighborhoodId) -> Result<NeighborhoodProfile>;

    /// Short label used in log lines.
    fn source_name(&self) -> &str {
        "reference-data"
    }
}

#[async_trait]
impl<P: NeighborhoodProfileProvider + ?Sized> NeighborhoodProfileProvider for Arc<P> {
    async fn fetch_profile(&self, id: &NeighborhoodId) -> Result<NeighborhoodProfile> {
        (**self).fetch_profile(id).await
    }

    fn source_name(&self) -> &str {
        (**self).source_name()
    }
}

#[async_trait]
impl<P: NeighborhoodProfileProvider + ?Sized> NeighborhoodProfileProvider for Box<P> {
    async fn fetch_profile(&self, id: &NeighborhoodId) -> Result<NeighborhoodProfile> {
        (**self).fetch_profile(id).await
    }

    fn source_name(&self) -> &str {
        (**self).source_name()
    }
}

/// Where batch results are written.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
