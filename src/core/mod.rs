pub mod footprint;
pub mod multi_story;
pub mod orchestrator;
pub mod reference_tables;
pub mod standalone;

pub use crate::domain::model::{CostBreakdown, CostEstimate, NeighborhoodProfile, ProjectSpec};
pub use crate::domain::ports::{NeighborhoodProfileProvider, Storage};
pub use crate::utils::error::Result;
