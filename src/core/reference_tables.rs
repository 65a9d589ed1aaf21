//! Calibrated house prices.
//!
//! Economic and Mid rows hold single-story figures for both roofing types;
//! multi-level houses are derived by multiplication (see `standalone`).
//! High and Luxury rows are tabulated per shape and must not be recomputed
//! from the single-story row: several duplex/triplex cells deviate from the
//! exact multiple. `LUXURY_TRIPLEX` rooms=6 carries a finishing figure at ×2
//! of the single-story value where its siblings use ×3; it is kept as issued
//! by the pricing sheet until the pricing owners confirm a correction.

use crate::domain::model::{FinishTier, HouseShape, RoofingType, RoomCount};

/// Single-story figures for one room count (Economic/Mid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineRow {
    pub rooms: u8,
    pub surface_m2: u32,
    pub structural_light: u64,
    pub structural_slab: u64,
    pub finishing: u64,
    pub total_light: u64,
    pub total_slab: u64,
}

impl BaselineRow {
    pub fn structural(&self, roofing: RoofingType) -> u64 {
        match roofing {
            RoofingType::Light => self.structural_light,
            RoofingType::Slab => self.structural_slab,
        }
    }

    pub fn total(&self, roofing: RoofingType) -> u64 {
        match roofing {
            RoofingType::Light => self.total_light,
            RoofingType::Slab => self.total_slab,
        }
    }
}

/// Figures for one (tier, shape, room count) cell (High/Luxury).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabulatedRow {
    pub rooms: u8,
    pub structural: u64,
    pub finishing: u64,
    pub total: u64,
}

#[rustfmt::skip]
static ECONOMIC_BASELINE: [BaselineRow; 9] = [
    BaselineRow { rooms: 2, surface_m2: 78, structural_light: 4_532_000, structural_slab: 6_209_000, finishing: 6_798_000, total_light: 11_330_000, total_slab: 13_007_000 },
    BaselineRow { rooms: 3, surface_m2: 103, structural_light: 5_912_000, structural_slab: 8_126_000, finishing: 8_868_000, total_light: 14_780_000, total_slab: 16_994_000 },
    BaselineRow { rooms: 4, surface_m2: 128, structural_light: 7_276_000, structural_slab: 10_028_000, finishing: 10_914_000, total_light: 18_190_000, total_slab: 20_942_000 },
    BaselineRow { rooms: 5, surface_m2: 152, structural_light: 8_592_000, structural_slab: 11_860_000, finishing: 12_888_000, total_light: 21_480_000, total_slab: 24_748_000 },
    BaselineRow { rooms: 6, surface_m2: 177, structural_light: 9_956_000, structural_slab: 13_762_000, finishing: 14_934_000, total_light: 24_890_000, total_slab: 28_696_000 },
    BaselineRow { rooms: 7, surface_m2: 201, structural_light: 11_248_000, structural_slab: 15_570_000, finishing: 16_872_000, total_light: 28_120_000, total_slab: 32_442_000 },
    BaselineRow { rooms: 8, surface_m2: 226, structural_light: 12_600_000, structural_slab: 17_459_000, finishing: 18_900_000, total_light: 31_500_000, total_slab: 36_359_000 },
    BaselineRow { rooms: 9, surface_m2: 251, structural_light: 13_944_000, structural_slab: 19_340_000, finishing: 20_916_000, total_light: 34_860_000, total_slab: 40_256_000 },
    BaselineRow { rooms: 10, surface_m2: 275, structural_light: 15_236_000, structural_slab: 21_148_000, finishing: 22_854_000, total_light: 38_090_000, total_slab: 44_002_000 },
];

#[rustfmt::skip]
static MID_BASELINE: [BaselineRow; 9] = [
    BaselineRow { rooms: 2, surface_m2: 84, structural_light: 6_702_000, structural_slab: 8_886_000, finishing: 12_448_000, total_light: 19_150_000, total_slab: 21_334_000 },
    BaselineRow { rooms: 3, surface_m2: 110, structural_light: 8_673_000, structural_slab: 11_533_000, finishing: 16_107_000, total_light: 24_780_000, total_slab: 27_640_000 },
    BaselineRow { rooms: 4, surface_m2: 136, structural_light: 10_619_000, structural_slab: 14_155_000, finishing: 19_721_000, total_light: 30_340_000, total_slab: 33_876_000 },
    BaselineRow { rooms: 5, surface_m2: 162, structural_light: 12_554_000, structural_slab: 16_766_000, finishing: 23_316_000, total_light: 35_870_000, total_slab: 40_082_000 },
    BaselineRow { rooms: 6, surface_m2: 188, structural_light: 14_462_000, structural_slab: 19_350_000, finishing: 26_858_000, total_light: 41_320_000, total_slab: 46_208_000 },
    BaselineRow { rooms: 7, surface_m2: 214, structural_light: 16_373_000, structural_slab: 21_937_000, finishing: 30_407_000, total_light: 46_780_000, total_slab: 52_344_000 },
    BaselineRow { rooms: 8, surface_m2: 240, structural_light: 18_270_000, structural_slab: 24_510_000, finishing: 33_930_000, total_light: 52_200_000, total_slab: 58_440_000 },
    BaselineRow { rooms: 9, surface_m2: 266, structural_light: 20_167_000, structural_slab: 27_083_000, finishing: 37_453_000, total_light: 57_620_000, total_slab: 64_536_000 },
    BaselineRow { rooms: 10, surface_m2: 292, structural_light: 22_054_000, structural_slab: 29_646_000, finishing: 40_956_000, total_light: 63_010_000, total_slab: 70_602_000 },
];

#[rustfmt::skip]
static HIGH_SINGLE_STORY: [TabulatedRow; 9] = [
    TabulatedRow { rooms: 2, structural: 10_010_000, finishing: 21_270_000, total: 31_280_000 },
    TabulatedRow { rooms: 3, structural: 13_056_000, finishing: 27_744_000, total: 40_800_000 },
    TabulatedRow { rooms: 4, structural: 16_102_000, finishing: 34_218_000, total: 50_320_000 },
    TabulatedRow { rooms: 5, structural: 19_149_000, finishing: 40_691_000, total: 59_840_000 },
    TabulatedRow { rooms: 6, structural: 22_195_000, finishing: 47_165_000, total: 69_360_000 },
    TabulatedRow { rooms: 7, structural: 25_242_000, finishing: 53_638_000, total: 78_880_000 },
    TabulatedRow { rooms: 8, structural: 28_288_000, finishing: 60_112_000, total: 88_400_000 },
    TabulatedRow { rooms: 9, structural: 31_334_000, finishing: 66_586_000, total: 97_920_000 },
    TabulatedRow { rooms: 10, structural: 34_381_000, finishing: 73_059_000, total: 107_440_000 },
];

#[rustfmt::skip]
static HIGH_DUPLEX: [TabulatedRow; 9] = [
    TabulatedRow { rooms: 2, structural: 20_020_000, finishing: 42_540_000, total: 62_560_000 },
    TabulatedRow { rooms: 3, structural: 26_112_000, finishing: 55_488_000, total: 81_600_000 },
    TabulatedRow { rooms: 4, structural: 31_721_000, finishing: 67_409_000, total: 99_130_000 },
    TabulatedRow { rooms: 5, structural: 38_298_000, finishing: 81_382_000, total: 119_680_000 },
    TabulatedRow { rooms: 6, structural: 44_390_000, finishing: 94_330_000, total: 138_720_000 },
    TabulatedRow { rooms: 7, structural: 49_979_000, finishing: 106_203_000, total: 156_182_000 },
    TabulatedRow { rooms: 8, structural: 56_576_000, finishing: 120_224_000, total: 176_800_000 },
    TabulatedRow { rooms: 9, structural: 61_728_000, finishing: 131_174_000, total: 192_902_000 },
    TabulatedRow { rooms: 10, structural: 68_762_000, finishing: 146_118_000, total: 214_880_000 },
];

#[rustfmt::skip]
static HIGH_TRIPLEX: [TabulatedRow; 9] = [
    TabulatedRow { rooms: 2, structural: 30_030_000, finishing: 63_810_000, total: 93_840_000 },
    TabulatedRow { rooms: 3, structural: 39_168_000, finishing: 83_232_000, total: 122_400_000 },
    TabulatedRow { rooms: 4, structural: 48_306_000, finishing: 102_654_000, total: 150_960_000 },
    TabulatedRow { rooms: 5, structural: 56_298_000, finishing: 119_632_000, total: 175_930_000 },
    TabulatedRow { rooms: 6, structural: 66_585_000, finishing: 141_495_000, total: 208_080_000 },
    TabulatedRow { rooms: 7, structural: 75_726_000, finishing: 160_914_000, total: 236_640_000 },
    TabulatedRow { rooms: 8, structural: 82_742_000, finishing: 175_828_000, total: 258_570_000 },
    TabulatedRow { rooms: 9, structural: 94_002_000, finishing: 199_758_000, total: 293_760_000 },
    TabulatedRow { rooms: 10, structural: 101_080_000, finishing: 214_793_000, total: 315_873_000 },
];

#[rustfmt::skip]
static LUXURY_SINGLE_STORY: [TabulatedRow; 9] = [
    TabulatedRow { rooms: 2, structural: 16_464_000, finishing: 42_336_000, total: 58_800_000 },
    TabulatedRow { rooms: 3, structural: 21_325_000, finishing: 54_835_000, total: 76_160_000 },
    TabulatedRow { rooms: 4, structural: 26_186_000, finishing: 67_334_000, total: 93_520_000 },
    TabulatedRow { rooms: 5, structural: 31_046_000, finishing: 79_834_000, total: 110_880_000 },
    TabulatedRow { rooms: 6, structural: 35_907_000, finishing: 92_333_000, total: 128_240_000 },
    TabulatedRow { rooms: 7, structural: 40_768_000, finishing: 104_832_000, total: 145_600_000 },
    TabulatedRow { rooms: 8, structural: 45_629_000, finishing: 117_331_000, total: 162_960_000 },
    TabulatedRow { rooms: 9, structural: 50_490_000, finishing: 129_830_000, total: 180_320_000 },
    TabulatedRow { rooms: 10, structural: 55_350_000, finishing: 142_330_000, total: 197_680_000 },
];

#[rustfmt::skip]
static LUXURY_DUPLEX: [TabulatedRow; 9] = [
    TabulatedRow { rooms: 2, structural: 32_928_000, finishing: 84_672_000, total: 117_600_000 },
    TabulatedRow { rooms: 3, structural: 42_224_000, finishing: 108_573_000, total: 150_797_000 },
    TabulatedRow { rooms: 4, structural: 52_372_000, finishing: 134_668_000, total: 187_040_000 },
    TabulatedRow { rooms: 5, structural: 62_092_000, finishing: 159_668_000, total: 221_760_000 },
    TabulatedRow { rooms: 6, structural: 70_737_000, finishing: 181_896_000, total: 252_633_000 },
    TabulatedRow { rooms: 7, structural: 81_536_000, finishing: 209_664_000, total: 291_200_000 },
    TabulatedRow { rooms: 8, structural: 91_258_000, finishing: 234_662_000, total: 325_920_000 },
    TabulatedRow { rooms: 9, structural: 100_980_000, finishing: 259_660_000, total: 360_640_000 },
    TabulatedRow { rooms: 10, structural: 108_486_000, finishing: 278_967_000, total: 387_453_000 },
];

#[rustfmt::skip]
static LUXURY_TRIPLEX: [TabulatedRow; 9] = [
    TabulatedRow { rooms: 2, structural: 49_392_000, finishing: 127_008_000, total: 176_400_000 },
    TabulatedRow { rooms: 3, structural: 63_975_000, finishing: 164_505_000, total: 228_480_000 },
    TabulatedRow { rooms: 4, structural: 76_987_000, finishing: 197_962_000, total: 274_949_000 },
    TabulatedRow { rooms: 5, structural: 93_138_000, finishing: 239_502_000, total: 332_640_000 },
    TabulatedRow { rooms: 6, structural: 107_721_000, finishing: 184_666_000, total: 292_387_000 },
    TabulatedRow { rooms: 7, structural: 122_304_000, finishing: 314_496_000, total: 436_800_000 },
    TabulatedRow { rooms: 8, structural: 136_887_000, finishing: 351_993_000, total: 488_880_000 },
    TabulatedRow { rooms: 9, structural: 147_683_000, finishing: 379_753_000, total: 527_436_000 },
    TabulatedRow { rooms: 10, structural: 166_050_000, finishing: 426_990_000, total: 593_040_000 },
];

/// Rows of the single-story table for a roofing-priced tier, `None` otherwise.
pub fn baseline_rows(tier: FinishTier) -> Option<&'static [BaselineRow]> {
    match tier {
        FinishTier::Economic => Some(&ECONOMIC_BASELINE[..]),
        FinishTier::Mid => Some(&MID_BASELINE[..]),
        FinishTier::High | FinishTier::Luxury => None,
    }
}

/// Rows tabulated per shape for High/Luxury, `None` for the other tiers.
pub fn tabulated_rows(tier: FinishTier, shape: HouseShape) -> Option<&'static [TabulatedRow]> {
    let rows: &'static [TabulatedRow] = match (tier, shape) {
        (FinishTier::High, HouseShape::SingleStory) => &HIGH_SINGLE_STORY,
        (FinishTier::High, HouseShape::Duplex) => &HIGH_DUPLEX,
        (FinishTier::High, HouseShape::Triplex) => &HIGH_TRIPLEX,
        (FinishTier::Luxury, HouseShape::SingleStory) => &LUXURY_SINGLE_STORY,
        (FinishTier::Luxury, HouseShape::Duplex) => &LUXURY_DUPLEX,
        (FinishTier::Luxury, HouseShape::Triplex) => &LUXURY_TRIPLEX,
        (FinishTier::Economic | FinishTier::Mid, _) => return None,
    };
    Some(rows)
}

pub fn baseline_row(tier: FinishTier, rooms: RoomCount) -> Option<&'static BaselineRow> {
    baseline_rows(tier)?.iter().find(|row| row.rooms == rooms.get())
}

pub fn tabulated_row(
    tier: FinishTier,
    shape: HouseShape,
    rooms: RoomCount,
) -> Option<&'static TabulatedRow> {
    tabulated_rows(tier, shape)?
        .iter()
        .find(|row| row.rooms == rooms.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_room_count_has_a_row() {
        for rooms in RoomCount::all() {
            for tier in [FinishTier::Economic, FinishTier::Mid] {
                assert!(baseline_row(tier, rooms).is_some(), "{} {:?}", tier, rooms);
            }
            for tier in [FinishTier::High, FinishTier::Luxury] {
                for shape in HouseShape::ALL {
                    assert!(tabulated_row(tier, shape, rooms).is_some());
                }
            }
        }
    }

    #[test]
    fn test_baseline_totals_add_up() {
        for tier in [FinishTier::Economic, FinishTier::Mid] {
            for row in baseline_rows(tier).unwrap() {
                assert_eq!(row.total_light, row.structural_light + row.finishing);
                assert_eq!(row.total_slab, row.structural_slab + row.finishing);
                assert!(row.structural_slab > row.structural_light);
            }
        }
    }

    #[test]
    fn test_tabulated_totals_add_up() {
        for tier in [FinishTier::High, FinishTier::Luxury] {
            for shape in HouseShape::ALL {
                for row in tabulated_rows(tier, shape).unwrap() {
                    assert_eq!(row.total, row.structural + row.finishing);
                }
            }
        }
    }

    #[test]
    fn test_tier_families_do_not_overlap() {
        assert!(baseline_rows(FinishTier::High).is_none());
        assert!(tabulated_rows(FinishTier::Mid, HouseShape::Duplex).is_none());
    }

    #[test]
    fn test_economic_light_three_rooms() {
        let row = baseline_row(FinishTier::Economic, RoomCount::new(3).unwrap()).unwrap();
        assert_eq!(row.structural(RoofingType::Light), 5_912_000);
        assert_eq!(row.finishing, 8_868_000);
        assert_eq!(row.total(RoofingType::Light), 14_780_000);
        assert_eq!(row.surface_m2, 103);
    }
}
