use crate::domain::model::NeighborhoodProfile;

/// Buildable footprint of a parcel: `land_area * coefficient / 100`.
///
/// Inputs are validated upstream (`ProjectSpec::new`, `NeighborhoodProfile::new`).
pub fn buildable_footprint_m2(land_area_m2: f64, profile: &NeighborhoodProfile) -> f64 {
    land_area_m2 * profile.land_use_coefficient / 100.0
}
