use crate::core::{footprint, multi_story, standalone};
use crate::domain::model::{
    CostBreakdown, CostEstimate, FinishTier, HouseShape, LevelCount, NeighborhoodProfile,
    ProjectSpec, RoofingType, RoomCount, Structure,
};
use crate::domain::ports::NeighborhoodProfileProvider;
use crate::domain::request::{EstimateReply, EstimateRequest};
use crate::utils::error::{ErrorCategory, EstimateError, Result};

/// Pricing strategy selected from the categorical inputs of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModel {
    /// Apartment block: per-m² formula over all levels.
    MultiStoryFormula { levels: LevelCount },
    /// Economic/Mid house: single-story table row scaled by the level count.
    BaselineTable {
        roofing: RoofingType,
        shape: HouseShape,
        rooms: RoomCount,
    },
    /// High/Luxury house: row tabulated for the shape.
    TabulatedTable { shape: HouseShape, rooms: RoomCount },
}

impl CostModel {
    pub fn select(spec: &ProjectSpec) -> Result<Self> {
        match *spec.structure() {
            Structure::MultiStory { levels } => Ok(Self::MultiStoryFormula { levels }),
            Structure::Standalone {
                shape,
                rooms,
                roofing,
            } => {
                if spec.finish_tier().requires_roofing() {
                    let roofing =
                        roofing.ok_or_else(|| EstimateError::missing("couverture_section"))?;
                    Ok(Self::BaselineTable {
                        roofing,
                        shape,
                        rooms,
                    })
                } else {
                    Ok(Self::TabulatedTable { shape, rooms })
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MultiStoryFormula { .. } => "multi_story_formula",
            Self::BaselineTable { .. } => "baseline_table",
            Self::TabulatedTable { .. } => "tabulated_table",
        }
    }

    pub fn apply(&self, footprint_m2: f64, tier: FinishTier) -> Result<CostBreakdown> {
        match *self {
            Self::MultiStoryFormula { levels } => {
                Ok(multi_story::estimate(footprint_m2, levels, tier))
            }
            Self::BaselineTable {
                roofing,
                shape,
                rooms,
            } => standalone::estimate_baseline(footprint_m2, tier, roofing, shape, rooms),
            Self::TabulatedTable { shape, rooms } => {
                standalone::estimate_tabulated(footprint_m2, tier, shape, rooms)
            }
        }
    }
}

/// Entry point of the estimator: one profile read, then a pure computation.
pub struct CostOrchestrator<P: NeighborhoodProfileProvider> {
    provider: P,
}

impl<P: NeighborhoodProfileProvider> CostOrchestrator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn estimate(&self, spec: &ProjectSpec) -> Result<CostEstimate> {
        tracing::debug!(
            "Fetching profile for neighborhood {} from {}",
            spec.neighborhood_id(),
            self.provider.source_name()
        );
        let profile = self.provider.fetch_profile(spec.neighborhood_id()).await?;
        compute(spec, &profile)
    }

    /// Wire entry point: validation, estimate, and status mapping.
    pub async fn handle(&self, request: &EstimateRequest) -> EstimateReply {
        let outcome = match request.to_project_spec() {
            Ok(spec) => self.estimate(&spec).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(estimate) => EstimateReply::success(estimate),
            Err(e) => {
                log_failure(&e);
                EstimateReply::failure(&e)
            }
        }
    }

    pub async fn handle_json(&self, body: &str) -> EstimateReply {
        match EstimateRequest::from_json(body) {
            Ok(request) => self.handle(&request).await,
            Err(e) => {
                log_failure(&e);
                EstimateReply::failure(&e)
            }
        }
    }
}

/// The synchronous part of an estimate, once the profile is known.
pub fn compute(spec: &ProjectSpec, profile: &NeighborhoodProfile) -> Result<CostEstimate> {
    let footprint_m2 = footprint::buildable_footprint_m2(spec.land_area_m2(), profile);
    let model = CostModel::select(spec)?;
    tracing::debug!("Selected cost model {} for {:?}", model.name(), spec.structure());

    let breakdown = model.apply(footprint_m2, spec.finish_tier())?;

    let (level_count, house_shape, room_count, roofing_type) = match *spec.structure() {
        Structure::MultiStory { levels } => (Some(levels), None, None, None),
        Structure::Standalone {
            shape,
            rooms,
            roofing,
        } => (None, Some(shape), Some(rooms), roofing),
    };

    tracing::info!(
        "🏗️ Estimate {} / {}: footprint {:.2} m², total {:.0}",
        spec.building_category(),
        spec.finish_tier(),
        footprint_m2,
        breakdown.total_cost
    );

    Ok(CostEstimate {
        building_category: spec.building_category(),
        finish_tier: spec.finish_tier(),
        land_area_m2: spec.land_area_m2(),
        land_use_coefficient: profile.land_use_coefficient,
        level_count,
        house_shape,
        room_count,
        roofing_type,
        breakdown,
    })
}

fn log_failure(error: &EstimateError) {
    match error.category() {
        ErrorCategory::NotFound => tracing::warn!("❌ {}", error),
        ErrorCategory::Validation => tracing::info!("❌ Rejected request: {}", error),
        _ => tracing::error!(
            "❌ Estimate failed: {} (Category: {:?}, Severity: {:?})",
            error,
            error.category(),
            error.severity()
        ),
    }
}
