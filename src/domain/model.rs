//! Value types shared by every layer of the estimator.
//!
//! Categorical inputs are enums serialized with the vocabulary used by the
//! marketplace front-end (`immeuble`, `moyen`, `plain_pied`, ...), so the wire
//! request deserializes straight into them.

use crate::utils::error::{EstimateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a neighborhood (quartier) in the reference data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeighborhoodId(String);

impl NeighborhoodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NeighborhoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NeighborhoodId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Land-use data for one neighborhood. Only the coefficient is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodProfile {
    pub neighborhood_id: NeighborhoodId,
    /// Percentage of the parcel that may be built upon, in (0, 100].
    pub land_use_coefficient: f64,
}

impl NeighborhoodProfile {
    pub fn new(neighborhood_id: NeighborhoodId, land_use_coefficient: f64) -> Result<Self> {
        if !land_use_coefficient.is_finite()
            || land_use_coefficient <= 0.0
            || land_use_coefficient > 100.0
        {
            return Err(EstimateError::InvalidProfileError {
                neighborhood_id: neighborhood_id.to_string(),
                reason: format!(
                    "land-use coefficient must be in (0, 100], got {}",
                    land_use_coefficient
                ),
            });
        }

        Ok(Self {
            neighborhood_id,
            land_use_coefficient,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingCategory {
    #[serde(rename = "immeuble")]
    MultiStory,
    #[serde(rename = "logement")]
    Standalone,
}

impl BuildingCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultiStory => "immeuble",
            Self::Standalone => "logement",
        }
    }
}

impl fmt::Display for BuildingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality level of the construction (standing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishTier {
    #[serde(rename = "economique")]
    Economic,
    #[serde(rename = "moyen")]
    Mid,
    #[serde(rename = "haut")]
    High,
    #[serde(rename = "tres_haut")]
    Luxury,
}

impl FinishTier {
    pub const ALL: [FinishTier; 4] = [Self::Economic, Self::Mid, Self::High, Self::Luxury];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economic => "economique",
            Self::Mid => "moyen",
            Self::High => "haut",
            Self::Luxury => "tres_haut",
        }
    }

    /// Economic and Mid houses are priced per roofing type; High and Luxury are not.
    pub const fn requires_roofing(self) -> bool {
        matches!(self, Self::Economic | Self::Mid)
    }
}

impl fmt::Display for FinishTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseShape {
    #[serde(rename = "plain_pied")]
    SingleStory,
    #[serde(rename = "duplex")]
    Duplex,
    #[serde(rename = "triplex")]
    Triplex,
}

impl HouseShape {
    pub const ALL: [HouseShape; 3] = [Self::SingleStory, Self::Duplex, Self::Triplex];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleStory => "plain_pied",
            Self::Duplex => "duplex",
            Self::Triplex => "triplex",
        }
    }

    pub const fn level_multiplier(self) -> u32 {
        match self {
            Self::SingleStory => 1,
            Self::Duplex => 2,
            Self::Triplex => 3,
        }
    }
}

impl fmt::Display for HouseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roof construction (couverture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofingType {
    #[serde(rename = "legere")]
    Light,
    #[serde(rename = "dalle")]
    Slab,
}

impl RoofingType {
    pub const ALL: [RoofingType; 2] = [Self::Light, Self::Slab];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "legere",
            Self::Slab => "dalle",
        }
    }
}

impl fmt::Display for RoofingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of levels of an apartment block, ground floor included (`R+n` gives `n + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelCount(u32);

impl LevelCount {
    pub const ONE: LevelCount = LevelCount(1);

    pub fn new(levels: u32) -> Result<Self> {
        if levels == 0 {
            return Err(EstimateError::validation("niveau", "level count must be at least 1"));
        }
        Ok(Self(levels))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Room count of a house, always within the tabulated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCount(u8);

impl RoomCount {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 10;

    pub fn new(rooms: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&rooms) {
            return Err(EstimateError::validation(
                "pieces",
                format!(
                    "room count must be between {} and {}, got {}",
                    Self::MIN,
                    Self::MAX,
                    rooms
                ),
            ));
        }
        Ok(Self(rooms))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = RoomCount> {
        (Self::MIN..=Self::MAX).map(RoomCount)
    }
}

/// Branch-specific part of a project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Structure {
    MultiStory {
        levels: LevelCount,
    },
    Standalone {
        shape: HouseShape,
        rooms: RoomCount,
        /// Present exactly when the finish tier requires it.
        roofing: Option<RoofingType>,
    },
}

/// A validated estimation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSpec {
    neighborhood_id: NeighborhoodId,
    land_area_m2: f64,
    finish_tier: FinishTier,
    structure: Structure,
}

impl ProjectSpec {
    pub fn new(
        neighborhood_id: NeighborhoodId,
        land_area_m2: f64,
        finish_tier: FinishTier,
        structure: Structure,
    ) -> Result<Self> {
        if neighborhood_id.as_str().is_empty() {
            return Err(EstimateError::missing("selected_quartier_id"));
        }
        crate::utils::validation::validate_positive_measure("superficie", land_area_m2)?;

        let structure = match structure {
            Structure::Standalone {
                shape,
                rooms,
                roofing,
            } => {
                let roofing = if finish_tier.requires_roofing() {
                    Some(roofing.ok_or_else(|| EstimateError::missing("couverture_section"))?)
                } else {
                    // 高級與豪華等級不區分屋頂類型
                    None
                };
                Structure::Standalone {
                    shape,
                    rooms,
                    roofing,
                }
            }
            multi @ Structure::MultiStory { .. } => multi,
        };

        Ok(Self {
            neighborhood_id,
            land_area_m2,
            finish_tier,
            structure,
        })
    }

    pub fn multi_story(
        neighborhood_id: impl Into<NeighborhoodId>,
        land_area_m2: f64,
        finish_tier: FinishTier,
        levels: LevelCount,
    ) -> Result<Self> {
        Self::new(
            neighborhood_id.into(),
            land_area_m2,
            finish_tier,
            Structure::MultiStory { levels },
        )
    }

    pub fn standalone(
        neighborhood_id: impl Into<NeighborhoodId>,
        land_area_m2: f64,
        finish_tier: FinishTier,
        shape: HouseShape,
        rooms: RoomCount,
        roofing: Option<RoofingType>,
    ) -> Result<Self> {
        Self::new(
            neighborhood_id.into(),
            land_area_m2,
            finish_tier,
            Structure::Standalone {
                shape,
                rooms,
                roofing,
            },
        )
    }

    pub fn neighborhood_id(&self) -> &NeighborhoodId {
        &self.neighborhood_id
    }

    pub fn land_area_m2(&self) -> f64 {
        self.land_area_m2
    }

    pub fn finish_tier(&self) -> FinishTier {
        self.finish_tier
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn building_category(&self) -> BuildingCategory {
        match self.structure {
            Structure::MultiStory { .. } => BuildingCategory::MultiStory,
            Structure::Standalone { .. } => BuildingCategory::Standalone,
        }
    }
}

impl From<String> for NeighborhoodId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Cost figures for one estimate. `total_cost` is always the sum of the two parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub buildable_footprint_m2: f64,
    pub structural_cost: f64,
    pub finishing_cost: f64,
    pub total_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructed_surface_per_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructed_surface_total: Option<f64>,
}

impl CostBreakdown {
    pub fn new(buildable_footprint_m2: f64, structural_cost: f64, finishing_cost: f64) -> Self {
        Self {
            buildable_footprint_m2,
            structural_cost,
            finishing_cost,
            total_cost: structural_cost + finishing_cost,
            constructed_surface_per_level: None,
            constructed_surface_total: None,
        }
    }

    pub fn with_surfaces(mut self, per_level: f64, total: f64) -> Self {
        self.constructed_surface_per_level = Some(per_level);
        self.constructed_surface_total = Some(total);
        self
    }
}

/// A breakdown paired with the input context it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    #[serde(rename = "ouvrage")]
    pub building_category: BuildingCategory,
    #[serde(rename = "standing")]
    pub finish_tier: FinishTier,
    #[serde(rename = "superficie")]
    pub land_area_m2: f64,
    pub land_use_coefficient: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_count: Option<LevelCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_shape: Option<HouseShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_count: Option<RoomCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roofing_type: Option<RoofingType>,
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
}
