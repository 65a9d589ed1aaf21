pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LocalStorage};

pub use adapters::{HttpProfileProvider, InMemoryProfileProvider};
pub use core::orchestrator::{CostModel, CostOrchestrator};
pub use domain::model::{
    BuildingCategory, CostBreakdown, CostEstimate, FinishTier, HouseShape, LevelCount,
    NeighborhoodId, NeighborhoodProfile, ProjectSpec, RoofingType, RoomCount, Structure,
};
pub use domain::ports::NeighborhoodProfileProvider;
pub use domain::request::{EstimateReply, EstimateRequest, EstimateResponse};
pub use utils::error::{EstimateError, Result};
