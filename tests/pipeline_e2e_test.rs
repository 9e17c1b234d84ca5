// ==========================================
// Analysis pipeline - end-to-end tests
// ==========================================
// Full workbook (primary + auxiliary sheets) through lookups,
// consolidation, enrichment and classification
// ==========================================


use inventory_analytics::importer::read_csv_sheet;
use inventory_analytics::logging;
use inventory_analytics::{
    runway_days, AnalysisConfig, AnalysisPipeline, AnalysisReport, AnalyticsError, Cell,
    HealthBucket, LookupBuilder, SheetKind, StabilityClass, ValueClass, Workbook,
};
use std::io::Write;
use tempfile::Builder;
use test_helpers::{approx_eq, grafana_row, primary_sheet, strip_ids, SheetBuilder};

// ==========================================
// Fixtures
// ==========================================

fn full_workbook() -> Workbook {
    // History is most recent first; A1 ends on a spike
    let mut spike = vec![100.0];
    spike.extend(vec![10.0; 9]);

    let primary = primary_sheet(
        10,
        vec![
            grafana_row("A1", "Filtro aceite", "DEPOSITO 80", 100.0, 300.0, 10.0, &spike),
            grafana_row("A1", "", "DEPOSITO 1", 50.0, 100.0, 10.0, &[0.0; 10]),
            grafana_row("B2", "Bomba agua", "DEPOSITO 86", 30.0, 20.0, 20.0, &[1.0; 10]),
            grafana_row("C3", "Correa", "DEPOSITO 89", 0.0, 40.0, 2.0, &[0.0; 10]),
            vec!["TOTAL".into(), Cell::Empty, Cell::Empty, 180.into(), 460.into()],
        ],
    );

    let listing = SheetBuilder::new(
        "STOCK ML",
        &["SKU", "IMPULSAR", "ESTADO DE PUBLICACION", "Calidad ok"],
    )
    .row(vec!["a1".into(), "SI".into(), "Activa".into(), "OK".into()])
    .row(vec!["B2".into(), "NO".into(), "Pausada".into(), Cell::Empty])
    .build();

    let charges = SheetBuilder::new(
        "CARGOS",
        &["SKU", "Unidades", "Cargo por unidad", "FECHA", "Antigüedad"],
    )
    .row(vec!["A1".into(), 4.into(), 2.5.into(), 45000.into(), "60 días".into()])
    .row(vec!["A1".into(), 2.into(), 3.into(), 45030.into(), "90 días".into()])
    .row(vec!["B2".into(), 1.into(), 1.into(), 45030.into(), Cell::Empty])
    .build();

    let ai_plan = SheetBuilder::new("PLAN ML", &["SKU", "Recomendación", "Unidades sugeridas"])
        .row(vec!["A1".into(), "Reponer con URGENCIA".into(), 40.into()])
        .row(vec!["B2".into(), "Mantener".into(), 0.into()])
        .build();

    let shipments = SheetBuilder::new("ENVIADOS", &["SKU", "ENVIO REALIZADO"])
        .row(vec!["A1".into(), 5.into()])
        .row(vec!["A1".into(), "7".into()])
        .build();

    let basket = SheetBuilder::new("CANASTA", &["SKU", "FLAG BLOQUEADOS"])
        .row(vec!["C3".into(), " si ".into()])
        .row(vec!["B2".into(), "NO".into()])
        .build();

    let codes = SheetBuilder::new("MLA", &["SKU", "MLA", "ESTADO"])
        .row(vec!["A1".into(), "mla123".into(), "active".into()])
        .build();

    Workbook::new()
        .with_sheet(SheetKind::Primary, primary)
        .with_sheet(SheetKind::ListingStatus, listing)
        .with_sheet(SheetKind::Charges, charges)
        .with_sheet(SheetKind::AiPlan, ai_plan)
        .with_sheet(SheetKind::Shipments, shipments)
        .with_sheet(SheetKind::Basket, basket)
        .with_sheet(SheetKind::MarketplaceCodes, codes)
}

fn run(workbook: &Workbook) -> AnalysisReport {
    logging::init_test();
    let config = AnalysisConfig::default();
    let sentinel = config.days_of_stock_sentinel;
    AnalysisPipeline::new(config)
        .run(workbook, |record| Some(runway_days(record, sentinel)))
        .unwrap()
}

// ==========================================
// Tests
// ==========================================

#[test]
fn test_full_workbook_end_to_end() {
    let report = run(&full_workbook());

    // Sales value: A1 1500, B2 600, C3 0
    let order: Vec<&str> = report.records.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(order, vec!["A1", "B2", "C3"]);
    assert_eq!(report.flat_rows.len(), 4);

    // 1500 / 2100 falls inside the A cut-off
    let a1 = &report.records[0];
    assert_eq!(a1.demand_total, 150.0);
    assert_eq!(a1.demand_full, 100.0);
    assert_eq!(a1.demand_central, 50.0);
    assert_eq!(a1.stock_total, 400.0);
    assert_eq!(a1.description, "Filtro aceite");
    assert!(a1.anomaly);
    assert_eq!(a1.value_class, Some(ValueClass::A));

    let b2 = &report.records[1];
    assert_eq!(b2.depot_breakdown.get("86"), Some(&30.0));
    // Flat daily history of 1 against a total of 30: deviation 29 around the total
    assert!(approx_eq(b2.std_dev, 29.0));
    assert_eq!(b2.stability, Some(StabilityClass::Erratic));
    assert!(!b2.anomaly);
    assert_eq!(b2.value_class, Some(ValueClass::C));

    let c3 = &report.records[2];
    assert_eq!(c3.stability, Some(StabilityClass::Inactive));
    assert_eq!(c3.value_class, Some(ValueClass::C));
    assert_eq!(c3.days_of_stock, Some(999.0));
    assert_eq!(c3.health, Some(HealthBucket::Obsolete));
    assert_eq!(c3.abc_xyz.as_deref(), Some("CZ"));
    assert_eq!(report.summary.count("AZ"), 1);
    assert_eq!(report.summary.count("CZ"), 2);

    assert!(approx_eq(report.summary.total_sales_value, 2100.0));
    let stock_value: f64 = report.records.iter().map(|r| r.stock_value()).sum();
    assert!(approx_eq(report.summary.matrix.total(), stock_value));
    assert_eq!(report.snapshot.get("A1"), Some(150.0));
}

#[test]
fn test_lookups_built_from_auxiliary_sheets() {
    let lookups = run(&full_workbook()).lookups;

    let listing = lookups.listing_status.get("A1").unwrap();
    assert!(listing.boost);
    assert_eq!(listing.status, "Activa");
    assert!(!lookups.listing_status["B2"].boost);

    // Only the latest charge period is kept
    let charge = lookups.charges.get("A1").unwrap();
    assert_eq!(charge.units, 2.0);
    assert_eq!(charge.amount, 6.0);
    assert_eq!(charge.age, "90 días");
    assert_eq!(lookups.charges.latest_date, Some(45030.0));
    assert!(lookups.charges.latest_calendar_date().is_some());

    assert!(lookups.ai_plan["A1"].urgent);
    assert_eq!(lookups.ai_plan["A1"].suggested_units, 40.0);
    assert!(!lookups.ai_plan["B2"].urgent);

    assert_eq!(lookups.shipped("A1"), 12.0);
    assert_eq!(lookups.shipped("B2"), 0.0);

    assert!(lookups.is_blocked("C3"));
    assert!(!lookups.is_blocked("B2"));
    assert!(!lookups.is_blocked("ZZ"));

    let code = &lookups.marketplace_codes["A1"];
    assert_eq!(code.code, "MLA123");
    assert_eq!(code.status, "ACTIVE");
}

#[test]
fn test_rerun_is_identical_apart_from_row_ids() {
    let workbook = full_workbook();
    let first = run(&workbook);
    let second = run(&workbook);

    let first_ids: Vec<_> = first.flat_rows.iter().map(|r| r.id).collect();
    let second_ids: Vec<_> = second.flat_rows.iter().map(|r| r.id).collect();
    assert_ne!(first_ids, second_ids);

    let mut a = serde_json::to_value(&first).unwrap();
    let mut b = serde_json::to_value(&second).unwrap();
    strip_ids(&mut a);
    strip_ids(&mut b);
    assert_eq!(a, b);
}

#[test]
fn test_broken_auxiliary_sheet_does_not_block_analysis() {
    let mut workbook = full_workbook();
    workbook.insert(
        SheetKind::Charges,
        SheetBuilder::new("CARGOS", &["Codigo", "Unidades"])
            .row(vec!["A1".into(), 3.into()])
            .build(),
    );
    let report = run(&workbook);
    assert!(report.lookups.charges.is_empty());
    assert_eq!(report.records.len(), 3);
}

#[test]
fn test_lookups_do_not_need_primary_sheet() {
    let mut workbook = Workbook::new();
    workbook.insert(
        SheetKind::Basket,
        SheetBuilder::new("CANASTA", &["SKU", "BLOQUEADO"])
            .row(vec!["X1".into(), "S".into()])
            .build(),
    );
    let lookups = LookupBuilder::new().build(&workbook);
    assert!(lookups.is_blocked("X1"));

    let err = AnalysisPipeline::new(AnalysisConfig::default())
        .run(&workbook, |_| None)
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::EmptySheet { .. }));
}

#[test]
fn test_unassigned_runway_is_obsolete() {
    let report = AnalysisPipeline::new(AnalysisConfig::default())
        .run(&full_workbook(), |_| None)
        .unwrap();
    assert!(report
        .records
        .iter()
        .all(|r| r.health == Some(HealthBucket::Obsolete)));
}

#[test]
fn test_csv_primary_sheet_through_pipeline() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "SKU,Deposito,VTAR,Stock,Costo").unwrap();
    writeln!(file, "A1,DEPOSITO 80,10,50,\"2,5\"").unwrap();
    writeln!(file, "A1,DEPOSITO 1,5,20,\"2,5\"").unwrap();
    writeln!(file, "B2,DEPOSITO 87,\"1.000,5\",1,1").unwrap();
    file.flush().unwrap();

    let sheet = read_csv_sheet(file.path()).unwrap();
    let workbook = Workbook::new().with_sheet(SheetKind::Primary, sheet);
    let report = run(&workbook);

    let b2 = report.records.iter().find(|r| r.sku == "B2").unwrap();
    assert_eq!(b2.demand_total, 1000.5);
    let a1 = report.records.iter().find(|r| r.sku == "A1").unwrap();
    assert_eq!(a1.demand_total, 15.0);
    assert_eq!(a1.unit_cost, 2.5);
    assert_eq!(report.flat_rows.len(), 3);
}
