use build_cost_estimator::{
    CostOrchestrator, EstimateRequest, FinishTier, HouseShape, InMemoryProfileProvider,
    NeighborhoodId, NeighborhoodProfile,
};
use serde_json::json;

// (tier, shape, rooms, structural, finishing, total) as published in the price tables
#[rustfmt::skip]
const PUBLISHED: &[(FinishTier, HouseShape, u8, f64, f64, f64)] = &[
    // High / SingleStory
    (FinishTier::High, HouseShape::SingleStory, 2, 10_010_000.0, 21_270_000.0, 31_280_000.0),
    (FinishTier::High, HouseShape::SingleStory, 3, 13_056_000.0, 27_744_000.0, 40_800_000.0),
    (FinishTier::High, HouseShape::SingleStory, 4, 16_102_000.0, 34_218_000.0, 50_320_000.0),
    (FinishTier::High, HouseShape::SingleStory, 5, 19_149_000.0, 40_691_000.0, 59_840_000.0),
    (FinishTier::High, HouseShape::SingleStory, 6, 22_195_000.0, 47_165_000.0, 69_360_000.0),
    (FinishTier::High, HouseShape::SingleStory, 7, 25_242_000.0, 53_638_000.0, 78_880_000.0),
    (FinishTier::High, HouseShape::SingleStory, 8, 28_288_000.0, 60_112_000.0, 88_400_000.0),
    (FinishTier::High, HouseShape::SingleStory, 9, 31_334_000.0, 66_586_000.0, 97_920_000.0),
    (FinishTier::High, HouseShape::SingleStory, 10, 34_381_000.0, 73_059_000.0, 107_440_000.0),
    // High / Duplex
    (FinishTier::High, HouseShape::Duplex, 2, 20_020_000.0, 42_540_000.0, 62_560_000.0),
    (FinishTier::High, HouseShape::Duplex, 3, 26_112_000.0, 55_488_000.0, 81_600_000.0),
    (FinishTier::High, HouseShape::Duplex, 4, 31_721_000.0, 67_409_000.0, 99_130_000.0),
    (FinishTier::High, HouseShape::Duplex, 5, 38_298_000.0, 81_382_000.0, 119_680_000.0),
    (FinishTier::High, HouseShape::Duplex, 6, 44_390_000.0, 94_330_000.0, 138_720_000.0),
    (FinishTier::High, HouseShape::Duplex, 7, 49_979_000.0, 106_203_000.0, 156_182_000.0),
    (FinishTier::High, HouseShape::Duplex, 8, 56_576_000.0, 120_224_000.0, 176_800_000.0),
    (FinishTier::High, HouseShape::Duplex, 9, 61_728_000.0, 131_174_000.0, 192_902_000.0),
    (FinishTier::High, HouseShape::Duplex, 10, 68_762_000.0, 146_118_000.0, 214_880_000.0),
    // High / Triplex
    (FinishTier::High, HouseShape::Triplex, 2, 30_030_000.0, 63_810_000.0, 93_840_000.0),
    (FinishTier::High, HouseShape::Triplex, 3, 39_168_000.0, 83_232_000.0, 122_400_000.0),
    (FinishTier::High, HouseShape::Triplex, 4, 48_306_000.0, 102_654_000.0, 150_960_000.0),
    (FinishTier::High, HouseShape::Triplex, 5, 56_298_000.0, 119_632_000.0, 175_930_000.0),
    (FinishTier::High, HouseShape::Triplex, 6, 66_585_000.0, 141_495_000.0, 208_080_000.0),
    (FinishTier::High, HouseShape::Triplex, 7, 75_726_000.0, 160_914_000.0, 236_640_000.0),
    (FinishTier::High, HouseShape::Triplex, 8, 82_742_000.0, 175_828_000.0, 258_570_000.0),
    (FinishTier::High, HouseShape::Triplex, 9, 94_002_000.0, 199_758_000.0, 293_760_000.0),
    (FinishTier::High, HouseShape::Triplex, 10, 101_080_000.0, 214_793_000.0, 315_873_000.0),
    // Luxury / SingleStory
    (FinishTier::Luxury, HouseShape::SingleStory, 2, 16_464_000.0, 42_336_000.0, 58_800_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 3, 21_325_000.0, 54_835_000.0, 76_160_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 4, 26_186_000.0, 67_334_000.0, 93_520_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 5, 31_046_000.0, 79_834_000.0, 110_880_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 6, 35_907_000.0, 92_333_000.0, 128_240_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 7, 40_768_000.0, 104_832_000.0, 145_600_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 8, 45_629_000.0, 117_331_000.0, 162_960_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 9, 50_490_000.0, 129_830_000.0, 180_320_000.0),
    (FinishTier::Luxury, HouseShape::SingleStory, 10, 55_350_000.0, 142_330_000.0, 197_680_000.0),
    // Luxury / Duplex
    (FinishTier::Luxury, HouseShape::Duplex, 2, 32_928_000.0, 84_672_000.0, 117_600_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 3, 42_224_000.0, 108_573_000.0, 150_797_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 4, 52_372_000.0, 134_668_000.0, 187_040_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 5, 62_092_000.0, 159_668_000.0, 221_760_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 6, 70_737_000.0, 181_896_000.0, 252_633_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 7, 81_536_000.0, 209_664_000.0, 291_200_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 8, 91_258_000.0, 234_662_000.0, 325_920_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 9, 100_980_000.0, 259_660_000.0, 360_640_000.0),
    (FinishTier::Luxury, HouseShape::Duplex, 10, 108_486_000.0, 278_967_000.0, 387_453_000.0),
    // Luxury / Triplex
    (FinishTier::Luxury, HouseShape::Triplex, 2, 49_392_000.0, 127_008_000.0, 176_400_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 3, 63_975_000.0, 164_505_000.0, 228_480_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 4, 76_987_000.0, 197_962_000.0, 274_949_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 5, 93_138_000.0, 239_502_000.0, 332_640_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 6, 107_721_000.0, 184_666_000.0, 292_387_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 7, 122_304_000.0, 314_496_000.0, 436_800_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 8, 136_887_000.0, 351_993_000.0, 488_880_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 9, 147_683_000.0, 379_753_000.0, 527_436_000.0),
    (FinishTier::Luxury, HouseShape::Triplex, 10, 166_050_000.0, 426_990_000.0, 593_040_000.0),
];

fn orchestrator() -> CostOrchestrator<InMemoryProfileProvider> {
    let profile = NeighborhoodProfile::new(NeighborhoodId::new("7"), 50.0).unwrap();
    CostOrchestrator::new(InMemoryProfileProvider::from_profiles(vec![profile]).unwrap())
}

#[tokio::test]
async fn test_high_and_luxury_cells_match_published_figures() {
    let orchestrator = orchestrator();
    assert_eq!(PUBLISHED.len(), 2 * 3 * 9);

    for &(tier, shape, rooms, structural, finishing, total) in PUBLISHED {
        let request = EstimateRequest::from_value(json!({
            "selected_quartier_id": "7",
            "superficie": 500,
            "standing": tier,
            "ouvrage": "logement",
            "logement_type": shape,
            "pieces": rooms
        }))
        .unwrap();

        let reply = orchestrator.handle(&request).await;
        assert_eq!(reply.status_code, 200, "{} {} {}", tier, shape, rooms);

        let breakdown = reply.body.data.unwrap().breakdown;
        assert_eq!(breakdown.structural_cost, structural, "{} {} {}", tier, shape, rooms);
        assert_eq!(breakdown.finishing_cost, finishing, "{} {} {}", tier, shape, rooms);
        assert_eq!(breakdown.total_cost, total, "{} {} {}", tier, shape, rooms);
        assert_eq!(breakdown.buildable_footprint_m2, 250.0);
        assert!(breakdown.constructed_surface_per_level.is_none());
    }
}

#[tokio::test]
async fn test_luxury_triplex_six_rooms_keeps_its_recorded_finishing() {
    let orchestrator = orchestrator();
    let mut breakdowns = Vec::new();

    for shape in [HouseShape::SingleStory, HouseShape::Triplex] {
        let request = EstimateRequest::from_value(json!({
            "selected_quartier_id": "7",
            "superficie": 500,
            "standing": "tres_haut",
            "ouvrage": "logement",
            "logement_type": shape,
            "pieces": "6"
        }))
        .unwrap();
        breakdowns.push(orchestrator.handle(&request).await.body.data.unwrap().breakdown);
    }

    let (single, triplex) = (&breakdowns[0], &breakdowns[1]);
    assert_eq!(triplex.structural_cost, 3.0 * single.structural_cost);
    assert_eq!(triplex.finishing_cost, 2.0 * single.finishing_cost);
    assert_eq!(triplex.total_cost, triplex.structural_cost + triplex.finishing_cost);
}

#[tokio::test]
async fn test_roofing_is_ignored_for_high_and_luxury() {
    let orchestrator = orchestrator();
    let mut totals = Vec::new();

    for roofing in [None, Some("legere"), Some("dalle")] {
        let mut body = json!({
            "selected_quartier_id": "7",
            "superficie": 500,
            "standing": "haut",
            "ouvrage": "logement",
            "logement_type": "duplex",
            "pieces": 4
        });
        if let Some(roofing) = roofing {
            body["couverture_section"] = json!(roofing);
        }

        let reply = orchestrator
            .handle(&EstimateRequest::from_value(body).unwrap())
            .await;
        let estimate = reply.body.data.unwrap();
        assert!(estimate.roofing_type.is_none());
        totals.push(estimate.breakdown.total_cost);
    }

    assert!(totals.iter().all(|&total| total == 99_130_000.0));
}
