//! End-to-end refresh cycles: MockSource → FlipScanner → CycleReport,
//! using the full SkyBlock vocabulary and default thresholds.

use rust_decimal_macros::dec;

use flipper::engine::{FlipEngine, FlipScanner};
use flipper::types::*;

use crate::mock_source::{make_commodities, make_listing, FailOn, MockSource};

fn make_scanner(source: &MockSource) -> FlipScanner {
    FlipScanner::new(Box::new(source.clone()), FlipEngine::default())
}

/// Clean Hyperions plus three Sharpness VII Hyperions.
fn hyperion_snapshot() -> Vec<RawListing> {
    vec![
        make_listing("c1", "§6Hyperion", dec!(900_000), "", "s1"),
        make_listing("c2", "§6Hyperion", dec!(950_000), "", "s2"),
        make_listing("c3", "§6Hyperion", dec!(980_000), "", "s3"),
        make_listing("m1", "§6Hyperion", dec!(1_000_000), "§9Sharpness VII", "s4"),
        make_listing("m2", "§6Hyperion", dec!(1_300_000), "§9Sharpness VII", "s5"),
        make_listing("m3", "§6Hyperion", dec!(1_320_000), "§9Sharpness VII", "s6"),
    ]
}

#[tokio::test]
async fn test_enchanted_group_flip_end_to_end() {
    let source = MockSource::new(
        hyperion_snapshot(),
        make_commodities(&[("ENCHANTMENT_SHARPNESS_7", dec!(500_000))]),
    );
    let mut scanner = make_scanner(&source);

    let report = scanner.run_cycle().await.unwrap();
    assert_eq!(report.listings_fetched, 6);
    assert_eq!(report.commodities_priced, 1);
    assert_eq!(report.flips.len(), 1);

    let flip = &report.flips[0];
    assert_eq!(flip.id, "m1");
    assert_eq!(flip.name, "Hyperion");
    assert_eq!(flip.buy_price, dec!(1_000_000));
    assert_eq!(flip.market_price, dec!(1_300_000));
    assert_eq!(flip.profit, 260_999);
    assert_eq!(flip.estimated_worth, Some(1_400_000));
    assert_eq!(flip.worth_profit, Some(400_000));

    // The clean group nets 30,999.02, under the threshold.
    assert_eq!(report.summary.groups, 2);
    assert_eq!(report.summary.below_profit_threshold, 1);
}

#[tokio::test]
async fn test_two_listing_group_yields_nothing() {
    let listings = vec![
        make_listing("m1", "§6Hyperion", dec!(1_000_000), "§9Sharpness VII", "s1"),
        make_listing("m2", "§6Hyperion", dec!(1_300_000), "§9Sharpness VII", "s2"),
    ];
    let source = MockSource::new(listings, CommodityPriceMap::new());
    let mut scanner = make_scanner(&source);

    let report = scanner.run_cycle().await.unwrap();
    assert!(report.flips.is_empty());
    assert_eq!(report.summary.no_market_estimate, 1);
}

#[tokio::test]
async fn test_fully_modified_item_worth() {
    let lore = "§d§lUltimate Wise V\n§6[§5❂ Perfect Jasper§6]\n§6§l§ka§r §6§lMYTHIC SWORD §6§l§ka";
    let listings = vec![
        make_listing("clean", "§dHyperion", dec!(200_000_000), "", "s0"),
        make_listing("a", "§dHyperion", dec!(100_000_000), lore, "s1"),
        make_listing("b", "§dHyperion", dec!(130_000_000), lore, "s2"),
        make_listing("c", "§dHyperion", dec!(131_000_000), lore, "s3"),
    ];
    let commodities = make_commodities(&[
        ("ULTIMATE_WISE_5_BOOK", dec!(1_000_000)),
        ("PERFECT_JASPER_GEM", dec!(15_000_000)),
        ("RECOMBOBULATOR_3000", dec!(6_000_000)),
    ]);
    let source = MockSource::new(listings, commodities);
    let mut scanner = make_scanner(&source);

    let report = scanner.run_cycle().await.unwrap();
    assert_eq!(report.flips.len(), 1);

    let flip = &report.flips[0];
    assert_eq!(flip.id, "a");
    // 129,999,999 - 100,000,000 - 2,599,999.98 - 3,249,999.975
    assert_eq!(flip.profit, 24_149_999);
    // 200M baseline + 1M + 15M + 6M recombobulator.
    assert_eq!(flip.estimated_worth, Some(222_000_000));
    assert_eq!(flip.worth_profit, Some(122_000_000));
}

#[tokio::test]
async fn test_single_seller_wall_does_not_set_market() {
    let listings = vec![
        make_listing("buy", "Necron's Blade", dec!(1_000_000), "", "a"),
        make_listing("w1", "Necron's Blade", dec!(1_010_000), "", "wall"),
        make_listing("w2", "Necron's Blade", dec!(1_011_000), "", "wall"),
        make_listing("w3", "Necron's Blade", dec!(1_012_000), "", "wall"),
        make_listing("b", "Necron's Blade", dec!(1_500_000), "", "b"),
        make_listing("c", "Necron's Blade", dec!(1_510_000), "", "c"),
        make_listing("d", "Necron's Blade", dec!(1_520_000), "", "d"),
    ];
    let source = MockSource::new(listings, CommodityPriceMap::new());
    let mut scanner = make_scanner(&source);

    let report = scanner.run_cycle().await.unwrap();
    assert_eq!(report.flips.len(), 1);
    assert_eq!(report.flips[0].market_price, dec!(1_500_000));
    assert_eq!(report.flips[0].profit, 454_999);
}

#[tokio::test]
async fn test_failed_cycle_then_recovery() {
    let source = MockSource::new(hyperion_snapshot(), CommodityPriceMap::new());
    let mut scanner = make_scanner(&source);

    source.set_error(FailOn::Listings, "page 0 unavailable");
    let err = scanner.run_cycle().await.unwrap_err();
    assert!(err.to_string().contains("page 0 unavailable"));

    source.clear_error();
    let report = scanner.run_cycle().await.unwrap();
    assert_eq!(report.cycle_number, 2);
    assert_eq!(report.flips.len(), 1);
    // Both snapshots are requested every cycle.
    assert_eq!(source.fetch_count(), 4);
}

#[tokio::test]
async fn test_commodity_failure_fails_cycle() {
    let source = MockSource::new(hyperion_snapshot(), CommodityPriceMap::new());
    let mut scanner = make_scanner(&source);

    source.set_error(FailOn::Commodities, "bazaar down");
    assert!(scanner.run_cycle().await.is_err());
}

#[tokio::test]
async fn test_no_state_carried_between_cycles() {
    let source = MockSource::new(hyperion_snapshot(), CommodityPriceMap::new());
    let mut scanner = make_scanner(&source);

    let first = scanner.run_cycle().await.unwrap();
    assert_eq!(first.flips.len(), 1);

    source.set_listings(Vec::new());
    let second = scanner.run_cycle().await.unwrap();
    assert!(second.flips.is_empty());
    assert_eq!(second.summary.groups, 0);
}

#[test]
fn test_cycle_runs_on_blocking_executor() {
    let source = MockSource::new(hyperion_snapshot(), CommodityPriceMap::new());
    let mut scanner = make_scanner(&source);

    let report = tokio_test::block_on(scanner.run_cycle()).unwrap();
    assert_eq!(report.flips.len(), 1);
    assert_eq!(report.flips[0].estimated_worth, None);
}
