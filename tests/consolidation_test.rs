// ==========================================
// Grafana consolidation - integration tests
// ==========================================


use inventory_analytics::domain::DepotBucket;
use inventory_analytics::{AnalysisConfig, AnalyticsError, Cell, GrafanaConsolidator};
use test_helpers::{approx_eq, grafana_row, primary_sheet, SheetBuilder};

#[test]
fn test_two_depot_rows_fold_into_one_sku() {
    let sheet = SheetBuilder::new("GRAFANA", &["SKU", "Deposito", "VTAR", "Stock"])
        .row(vec!["A1".into(), "Deposito 80".into(), 10.into(), 50.into()])
        .row(vec!["A1".into(), "Deposito 1".into(), 5.into(), 20.into()])
        .build();

    let config = AnalysisConfig::default();
    let result = GrafanaConsolidator::new(&config).consolidate(&sheet).unwrap();

    assert_eq!(result.skus.len(), 1);
    let rec = result.skus.get("A1").unwrap();
    assert_eq!(rec.demand_total, 15.0);
    assert_eq!(rec.demand_full, 10.0);
    assert_eq!(rec.demand_central, 5.0);
    assert_eq!(rec.demand_branch, 0.0);
    assert_eq!(rec.stock_total, 70.0);

    assert_eq!(result.flat_rows.len(), 2);
    assert_eq!(result.flat_rows[0].depot, "DEPOSITO 80");
    assert_eq!(result.flat_rows[0].depot_days_of_stock, 5.0);
    assert_eq!(result.flat_rows[1].depot_days_of_stock, 4.0);
    assert_ne!(result.flat_rows[0].id, result.flat_rows[1].id);
}

#[test]
fn test_bucket_sums_equal_total_demand() {
    let rows = vec![
        grafana_row("A1", "Filtro", "DEPOSITO 80 FULL", 7.0, 1.0, 2.0, &[]),
        grafana_row("A1", "", "CENTRAL 1", 3.5, 2.0, 2.0, &[]),
        grafana_row("A1", "", "DEPOSITO 86", 4.0, 0.0, 2.0, &[]),
        grafana_row("B2", "Bomba", "DEPOSITO 87", 2.0, 9.0, 5.0, &[]),
    ];
    let config = AnalysisConfig::default();
    let result = GrafanaConsolidator::new(&config)
        .consolidate(&primary_sheet(0, rows))
        .unwrap();

    for rec in result.skus.iter() {
        let buckets = rec.demand_full + rec.demand_central + rec.demand_branch;
        assert!(approx_eq(buckets, rec.demand_total), "sku {}", rec.sku);
    }
    let a1 = result.skus.get("A1").unwrap();
    assert_eq!(a1.depot_breakdown.get("86"), Some(&4.0));
    assert_eq!(a1.description, "Filtro");
    assert_eq!(DepotBucket::classify("DEPOSITO 86"), DepotBucket::Branch);
}

#[test]
fn test_row_order_does_not_change_totals() {
    let rows = vec![
        grafana_row("A1", "x", "DEPOSITO 80", 10.0, 50.0, 1.0, &[]),
        grafana_row("B2", "y", "DEPOSITO 89", 1.5, 3.0, 1.0, &[]),
        grafana_row("A1", "x", "DEPOSITO 1", 5.0, 20.0, 1.0, &[]),
        grafana_row("C3", "z", "DEPOSITO 82", 0.25, 1.0, 1.0, &[]),
    ];
    let mut reversed = rows.clone();
    reversed.reverse();

    let config = AnalysisConfig::default();
    let consolidator = GrafanaConsolidator::new(&config);
    let forward = consolidator.consolidate(&primary_sheet(0, rows)).unwrap();
    let backward = consolidator.consolidate(&primary_sheet(0, reversed)).unwrap();

    for rec in forward.skus.iter() {
        let other = backward.skus.get(&rec.sku).unwrap();
        assert!(approx_eq(rec.demand_total, other.demand_total));
        assert!(approx_eq(rec.stock_total, other.stock_total));
        assert!(approx_eq(rec.demand_full, other.demand_full));
        assert!(approx_eq(rec.demand_central, other.demand_central));
        assert!(approx_eq(rec.demand_branch, other.demand_branch));
    }
    assert_eq!(forward.flat_rows.len(), backward.flat_rows.len());
}

#[test]
fn test_history_taken_from_first_row_only() {
    let rows = vec![
        grafana_row("A1", "x", "DEPOSITO 80", 10.0, 5.0, 1.0, &[1.0, 2.0, 3.0]),
        grafana_row("A1", "x", "DEPOSITO 1", 5.0, 5.0, 1.0, &[9.0, 9.0, 9.0]),
    ];
    let config = AnalysisConfig::default();
    let result = GrafanaConsolidator::new(&config)
        .consolidate(&primary_sheet(3, rows))
        .unwrap();

    let rec = result.skus.get("A1").unwrap();
    assert_eq!(rec.history, vec![1.0, 2.0, 3.0]);
    // Rolling averages divide by the full window length
    assert!(approx_eq(rec.rolling.last_15, 6.0 / 15.0));
    assert!(approx_eq(rec.rolling.last_60, 6.0 / 60.0));
}

#[test]
fn test_skus_normalized_and_total_row_skipped() {
    let sheet = SheetBuilder::new("GRAFANA", &["SKU", "VTAR", "Stock"])
        .row(vec![" a1 ".into(), "1.234,5".into(), "$ 10".into()])
        .row(vec!["A1".into(), 0.5.into(), Cell::Empty])
        .row(vec![Cell::Empty, 99.into(), 99.into()])
        .row(vec!["total".into(), 1000.into(), 1000.into()])
        .build();
    let config = AnalysisConfig::default();
    let result = GrafanaConsolidator::new(&config).consolidate(&sheet).unwrap();

    assert_eq!(result.skus.skus().collect::<Vec<_>>(), vec!["A1"]);
    let rec = result.skus.get("A1").unwrap();
    assert!(approx_eq(rec.demand_total, 1235.0));
    assert_eq!(rec.stock_total, 10.0);
    assert_eq!(result.flat_rows.len(), 2);
}

#[test]
fn test_missing_required_columns_reported_together() {
    let sheet = SheetBuilder::new("GRAFANA", &["SKU", "Deposito"])
        .row(vec!["A1".into(), "DEPOSITO 80".into()])
        .build();
    let config = AnalysisConfig::default();
    let err = GrafanaConsolidator::new(&config).consolidate(&sheet).unwrap_err();

    match err {
        AnalyticsError::MissingColumns { columns, .. } => {
            assert_eq!(columns, vec!["VTAR".to_string(), "Stock".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_header_only_sheet_is_empty_error() {
    let sheet = SheetBuilder::new("GRAFANA", &["SKU", "VTAR", "Stock"]).build();
    let config = AnalysisConfig::default();
    let err = GrafanaConsolidator::new(&config).consolidate(&sheet).unwrap_err();
    assert!(matches!(err, AnalyticsError::EmptySheet { .. }));
}
