//! Formula-based pricing of apartment blocks (immeubles).

use crate::domain::model::{CostBreakdown, FinishTier, LevelCount};

/// Structural price per m² by level count.
pub fn unit_structural_price(levels: LevelCount) -> f64 {
    match levels.get() {
        1 => 100_000.0,
        2..=4 => 110_000.0,
        5..=7 => 130_000.0,
        8..=10 => 150_000.0,
        11 => 180_000.0,
        _ => 100_000.0,
    }
}

/// Finishing price per m² and per level.
pub fn finishing_price_per_m2(tier: FinishTier) -> f64 {
    match tier {
        FinishTier::Economic => 120_000.0,
        FinishTier::Mid => 300_000.0,
        FinishTier::High => 500_000.0,
        FinishTier::Luxury => 1_000_000.0,
    }
}

pub fn estimate(footprint_m2: f64, levels: LevelCount, tier: FinishTier) -> CostBreakdown {
    let level_factor = f64::from(levels.get());
    let structural = unit_structural_price(levels) * footprint_m2 * level_factor;
    let finishing = finishing_price_per_m2(tier) * level_factor * footprint_m2;

    CostBreakdown::new(footprint_m2, structural, finishing)
        .with_surfaces(footprint_m2, footprint_m2 * level_factor)
}

/// Reads an `R+n` label (`"R+0"`, `"R+3"`, `"R+10 et plus"`) as `n + 1` levels.
pub fn parse_level_label(label: &str) -> Option<LevelCount> {
    let rest = label.trim().strip_prefix(['R', 'r'])?.trim_start();
    let rest = rest.strip_prefix('+')?.trim_start();
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let above_ground: u32 = rest[..digits_end].parse().ok()?;
    LevelCount::new(above_ground.checked_add(1)?).ok()
}

/// Like [`parse_level_label`], falling back to a single level for labels it
/// cannot read.
pub fn level_count_from_label(label: &str) -> LevelCount {
    parse_level_label(label).unwrap_or_else(|| {
        tracing::warn!("⚠️ Unrecognized level label '{}', assuming a single level", label);
        LevelCount::ONE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(n: u32) -> LevelCount {
        LevelCount::new(n).unwrap()
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(level_count_from_label("R+0"), levels(1));
        assert_eq!(level_count_from_label("R+2"), levels(3));
        assert_eq!(level_count_from_label("R+10"), levels(11));
        assert_eq!(level_count_from_label("R+10 et plus"), levels(11));
        assert_eq!(level_count_from_label("R+10 or more"), levels(11));
        assert_eq!(level_count_from_label(" r + 4 "), levels(5));
    }

    #[test]
    fn test_unreadable_labels_default_to_one_level() {
        assert_eq!(parse_level_label("RDC"), None);
        assert_eq!(parse_level_label("R+"), None);
        assert_eq!(parse_level_label("3"), None);
        assert_eq!(level_count_from_label("rez-de-chaussee"), LevelCount::ONE);
        assert_eq!(level_count_from_label(""), LevelCount::ONE);
    }

    #[test]
    fn test_unit_price_tiers() {
        let expected = [
            (1, 100_000.0),
            (2, 110_000.0),
            (4, 110_000.0),
            (5, 130_000.0),
            (7, 130_000.0),
            (8, 150_000.0),
            (10, 150_000.0),
            (11, 180_000.0),
            (12, 100_000.0),
        ];
        for (n, price) in expected {
            assert_eq!(unit_structural_price(levels(n)), price, "levels = {}", n);
        }
    }

    #[test]
    fn test_mid_tier_three_levels() {
        let breakdown = estimate(180.0, levels(3), FinishTier::Mid);
        assert_eq!(breakdown.structural_cost, 59_400_000.0);
        assert_eq!(breakdown.finishing_cost, 162_000_000.0);
        assert_eq!(breakdown.total_cost, 221_400_000.0);
        assert_eq!(breakdown.constructed_surface_per_level, Some(180.0));
        assert_eq!(breakdown.constructed_surface_total, Some(540.0));
    }

    #[test]
    fn test_luxury_single_level() {
        let breakdown = estimate(50.0, LevelCount::ONE, FinishTier::Luxury);
        assert_eq!(breakdown.structural_cost, 5_000_000.0);
        assert_eq!(breakdown.finishing_cost, 50_000_000.0);
    }
}
