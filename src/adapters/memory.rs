use crate::domain::model::{NeighborhoodId, NeighborhoodProfile};
use crate::domain::ports::NeighborhoodProfileProvider;
use crate::utils::error::{EstimateError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Reference data held in memory, loaded once from a file or built in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileProvider {
    profiles: HashMap<NeighborhoodId, NeighborhoodProfile>,
}

impl InMemoryProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the provider, rejecting ids that appear twice.
    pub fn from_profiles<I>(profiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = NeighborhoodProfile>,
    {
        let mut provider = Self::new();
        for profile in profiles {
            provider.insert(profile)?;
        }
        Ok(provider)
    }

    pub fn insert(&mut self, profile: NeighborhoodProfile) -> Result<()> {
        if self.profiles.contains_key(&profile.neighborhood_id) {
            return Err(EstimateError::ReferenceDataError {
                message: format!("duplicate neighborhood id '{}'", profile.neighborhood_id),
            });
        }
        self.profiles.insert(profile.neighborhood_id.clone(), profile);
        Ok(())
    }

    pub fn get(&self, id: &NeighborhoodId) -> Option<&NeighborhoodProfile> {
        self.profiles.get(id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl NeighborhoodProfileProvider for InMemoryProfileProvider {
    async fn fetch_profile(&self, id: &NeighborhoodId) -> Result<NeighborhoodProfile> {
        self.get(id).cloned().ok_or_else(|| EstimateError::NotFound {
            neighborhood_id: id.to_string(),
        })
    }

    fn source_name(&self) -> &str {
        "in-memory"
    }
}
