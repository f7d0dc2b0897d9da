//! End-to-end cost and comparison scenarios over the fixture dataset.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use soprum_core::{AnalyticsError, PortError, PropertyId, ServiceType, SizeClass, SoprumService};
use soprum_store_memory::{MemoryStore, backend};

const DATASET: &str = include_str!("fixtures/brf.json");

fn service() -> SoprumService {
    let store = MemoryStore::from_json(DATASET).expect("fixture parses");
    SoprumService::new(&backend(store))
}

#[tokio::test]
async fn annual_cost_combines_fee_lock_and_containers() {
    let report = service().annual_cost(PropertyId(1)).await.unwrap();

    assert_eq!(report.address, "Björkvägen 3", "address");
    assert_eq!(report.total_cost, dec!(6400.50), "total cost");
    assert_eq!(report.cost_per_apartment, dec!(640.05), "cost per apartment");
}

#[tokio::test]
async fn annual_cost_uses_distance_tier() {
    let report = service().annual_cost(PropertyId(2)).await.unwrap();

    assert_eq!(report.total_cost, dec!(7951.00), "total cost");
    assert_eq!(report.cost_per_apartment, dec!(662.58), "cost per apartment");
}

#[tokio::test]
async fn annual_cost_without_apartments() {
    let report = service().annual_cost(PropertyId(6)).await.unwrap();

    assert_eq!(report.total_cost, dec!(1149.00), "total cost");
    assert_eq!(report.cost_per_apartment, Decimal::ZERO, "cost per apartment");
}

#[tokio::test]
async fn annual_cost_of_unknown_property() {
    let err = service().annual_cost(PropertyId(42)).await.unwrap_err();
    assert!(matches!(err, AnalyticsError::PropertyNotFound(PropertyId(42))), "{err}");
}

#[tokio::test]
async fn missing_tariff_is_a_backend_failure() {
    let err = service().annual_cost(PropertyId(7)).await.unwrap_err();
    assert!(matches!(err, AnalyticsError::Port(PortError::Internal(_))), "{err}");
    assert!(!err.is_not_found(), "{err}");
}

#[tokio::test]
async fn user_costs_keep_ownership_order() {
    let reports = service().all_costs_for_user("anna").await.unwrap();

    let totals: Vec<_> = reports
        .iter()
        .map(|report| (report.property_id, report.total_cost))
        .collect();
    assert_eq!(
        totals,
        vec![(PropertyId(3), dec!(5100.00)), (PropertyId(1), dec!(6400.50))],
        "ownership order"
    );
}

#[tokio::test]
async fn user_without_properties() {
    for username in ["erik", "okänd"] {
        let err = service().all_costs_for_user(username).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::NoPropertiesForUser(_)), "{username}");
    }
}

#[tokio::test]
async fn comparison_against_matching_peers() {
    let report = service().comparison(PropertyId(1)).await.unwrap();

    assert_eq!(report.property_type, "Flerbostadshus", "type");
    assert_eq!(report.number_of_apartments, 10, "number of apartments");

    let cost = &report.cost_comparison;
    assert_eq!(cost.property_cost, dec!(6400.50), "property cost");
    assert_eq!(cost.average_cost, dec!(6525.50), "average cost");
    assert_eq!(cost.min_cost, dec!(5100.00), "min cost");
    assert_eq!(cost.max_cost, dec!(7951.00), "max cost");
    assert_eq!(cost.percentage_difference, dec!(-1.92), "percentage difference");
    assert_eq!(cost.comparison_group_size, 2, "comparison group size");

    let size = &report.container_size_comparison;
    assert_eq!(size.property_total_volume, 880, "property total volume");
    assert_eq!(size.average_volume, dec!(985.00), "average volume");
    assert_eq!(size.comparison, SizeClass::Smaller, "comparison");
    assert_eq!(size.comparison_group_size, 2, "comparison group size");
}

#[tokio::test]
async fn waste_amounts_per_service() {
    let rows = service()
        .waste_amount_comparisons(PropertyId(1))
        .await
        .unwrap();

    let summary: Vec<_> = rows
        .iter()
        .map(|row| {
            (
                row.service_type.clone(),
                row.property_amount,
                row.average_amount,
                row.percentage_difference,
                row.comparison_group_size,
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                ServiceType("Matavfall".to_owned()),
                dec!(7280),
                dec!(14560),
                dec!(-50),
                1
            ),
            (
                ServiceType("Pappersförpackningar".to_owned()),
                Decimal::ZERO,
                dec!(17160),
                dec!(-100),
                1
            ),
            (
                ServiceType("Restavfall".to_owned()),
                dec!(19240),
                dec!(21970),
                dec!(-12.43),
                2
            ),
        ],
        "waste per service"
    );
}

#[tokio::test]
async fn frequencies_per_service() {
    let rows = service().frequency_comparisons(PropertyId(1)).await.unwrap();

    let summary: Vec<_> = rows
        .iter()
        .map(|row| {
            (
                row.service_type.0.as_str(),
                row.property_frequency,
                row.average_frequency,
                row.percentage_difference,
                row.comparison_group_size,
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Matavfall", 52, dec!(52), Decimal::ZERO, 1),
            ("Pappersförpackningar", 0, dec!(26), dec!(-100), 1),
            ("Restavfall", 26, dec!(39), dec!(-33.33), 2),
        ],
        "frequency per service"
    );
}

#[tokio::test]
async fn comparison_without_peers_is_neutral() {
    let report = service().comparison(PropertyId(5)).await.unwrap();

    assert_eq!(report.property_type, "Radhus", "type");
    assert_eq!(report.cost_comparison.property_cost, dec!(1700.00), "property cost");
    assert_eq!(report.cost_comparison.average_cost, dec!(1700.00), "average cost");
    assert_eq!(report.cost_comparison.min_cost, dec!(1700.00), "min cost");
    assert_eq!(report.cost_comparison.max_cost, dec!(1700.00), "max cost");
    assert_eq!(
        report.cost_comparison.percentage_difference,
        Decimal::ZERO,
        "percentage difference"
    );
    assert_eq!(report.cost_comparison.comparison_group_size, 0, "comparison group size");
    assert_eq!(
        report.container_size_comparison.comparison,
        SizeClass::Similar,
        "comparison"
    );
    assert!(report.waste_amount_comparisons.is_empty(), "no waste rows");
    assert!(report.frequency_comparisons.is_empty(), "no frequency rows");
}

#[tokio::test]
async fn comparison_of_unknown_property() {
    let err = service().cost_comparison(PropertyId(404)).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}
