//! Reference data exported as CSV from the marketplace database.
//!
//! Expected header: `quartier_id,coefficient_occupa_sols`, optionally followed
//! by the per-neighborhood price-band columns, which are not read.

use crate::adapters::memory::InMemoryProfileProvider;
use crate::domain::model::{NeighborhoodId, NeighborhoodProfile};
use crate::utils::error::{EstimateError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ProfileRecord {
    quartier_id: String,
    coefficient_occupa_sols: Option<String>,
}

pub fn load_profiles<R: Read>(reader: R) -> Result<InMemoryProfileProvider> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut provider = InMemoryProfileProvider::new();
    for record in csv_reader.deserialize::<ProfileRecord>() {
        let record = record?;
        let id = NeighborhoodId::new(record.quartier_id);
        let coefficient = parse_coefficient(&id, record.coefficient_occupa_sols.as_deref())?;
        provider.insert(NeighborhoodProfile::new(id, coefficient)?)?;
    }

    tracing::debug!("Loaded {} neighborhood profiles from CSV", provider.len());
    Ok(provider)
}

pub fn load_profiles_from_path<P: AsRef<Path>>(path: P) -> Result<InMemoryProfileProvider> {
    let file = std::fs::File::open(path.as_ref())?;
    let provider = load_profiles(file)?;
    tracing::info!(
        "📁 Loaded {} neighborhood profiles from {}",
        provider.len(),
        path.as_ref().display()
    );
    Ok(provider)
}

pub fn load_profiles_from_bytes(data: &[u8]) -> Result<InMemoryProfileProvider> {
    load_profiles(data)
}

/// Coefficients may come as `60`, `60.5` or `60,5` depending on the export locale.
pub(crate) fn parse_coefficient(id: &NeighborhoodId, raw: Option<&str>) -> Result<f64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        EstimateError::InvalidProfileError {
            neighborhood_id: id.to_string(),
            reason: "missing land-use coefficient".to_string(),
        }
    })?;

    raw.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| EstimateError::InvalidProfileError {
            neighborhood_id: id.to_string(),
            reason: format!("land-use coefficient '{}' is not a number", raw),
        })
}
