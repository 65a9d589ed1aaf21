//! Table-based pricing of standalone houses (logements).

use crate::core::reference_tables::{baseline_row, tabulated_row};
use crate::domain::model::{CostBreakdown, FinishTier, HouseShape, RoofingType, RoomCount};
use crate::utils::error::{EstimateError, Result};

/// Economic/Mid: single-story row for the roofing type, every figure scaled
/// by the number of levels of the house.
pub fn estimate_baseline(
    footprint_m2: f64,
    tier: FinishTier,
    roofing: RoofingType,
    shape: HouseShape,
    rooms: RoomCount,
) -> Result<CostBreakdown> {
    let row = baseline_row(tier, rooms).ok_or_else(|| {
        EstimateError::internal(format!(
            "no single-story row for tier={} rooms={}",
            tier,
            rooms.get()
        ))
    })?;

    let multiplier = shape.level_multiplier() as u64;
    let structural = row.structural(roofing) * multiplier;
    let finishing = row.finishing * multiplier;
    debug_assert_eq!(structural + finishing, row.total(roofing) * multiplier);

    let surface = f64::from(row.surface_m2);
    Ok(
        CostBreakdown::new(footprint_m2, structural as f64, finishing as f64)
            .with_surfaces(surface, surface * multiplier as f64),
    )
}

/// High/Luxury: figures read as tabulated for the shape, no scaling.
pub fn estimate_tabulated(
    footprint_m2: f64,
    tier: FinishTier,
    shape: HouseShape,
    rooms: RoomCount,
) -> Result<CostBreakdown> {
    let row = tabulated_row(tier, shape, rooms).ok_or_else(|| {
        EstimateError::internal(format!(
            "no tabulated row for tier={} shape={} rooms={}",
            tier,
            shape,
            rooms.get()
        ))
    })?;

    Ok(CostBreakdown::new(
        footprint_m2,
        row.structural as f64,
        row.finishing as f64,
    ))
}
