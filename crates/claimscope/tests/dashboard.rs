//! End-to-end tests over the public dashboard API.

use claimscope::prelude::*;

const EPS: f64 = 1e-6;

#[test]
fn test_dataset_load_is_idempotent() {
    assert_eq!(Datasets::build(), Datasets::build());
    assert!(std::ptr::eq(Datasets::get(), Datasets::get()));
    assert_eq!(*Datasets::get(), Datasets::build());
}

#[test]
fn test_fraud_rate() {
    let data = Datasets::get();
    let fraud = data.fraud.fraudulent().total as f64;
    let total = sum_column(data.fraud.rows(), FraudColumn::Total).unwrap();

    assert_eq!(total, 20_000_000.0);
    let rate = percentage(fraud, total).unwrap();
    assert!((rate - 9.96607).abs() < EPS);
}

#[test]
fn test_most_expensive_procedures() {
    let data = Datasets::get();
    let top: Vec<&str> = top_n(data.procedures.rows(), ProcedureColumn::AvgPaid, 5, false)
        .into_iter()
        .map(|r| r.procedure.as_str())
        .collect();

    assert_eq!(
        top,
        [
            "Heart Bypass Surgery",
            "Knee Replacement",
            "Appendectomy",
            "Childbirth (C-Section)",
            "Cataract Surgery",
        ]
    );
}

#[test]
fn test_gender_claim_gap() {
    let data = Datasets::get();
    let male = data.gender.get(Gender::Male);
    let female = data.gender.get(Gender::Female);

    assert!((difference(male.avg_claim, female.avg_claim) - 41.86).abs() < 1e-9);
    assert!((difference(male.avg_paid, female.avg_paid) - 41.62).abs() < 1e-9);
}

#[test]
fn test_region_extremes() {
    let rows = Datasets::get().regions.rows();

    let (highest, max) = max_column(rows, RegionColumn::TotalClaims).unwrap();
    assert_eq!(highest.region, "Najran");
    assert_eq!(max, 1_541_848.0);

    let (lowest, min) = min_column(rows, RegionColumn::TotalClaims).unwrap();
    assert_eq!(lowest.region, "Hail");
    assert_eq!(min, 1_535_090.0);
}

#[test]
fn test_cheap_procedures_keep_input_order() {
    let data = Datasets::get();
    let range = CostRange::new(0.0, 1000.0).unwrap();
    let filtered = filter_range(data.procedures.rows(), ProcedureColumn::AvgPaid, &range);

    let names: Vec<&str> = filtered.iter().map(|r| r.procedure.as_str()).collect();
    assert_eq!(
        names,
        [
            "Prescription Medication",
            "Annual Checkup",
            "Physical Therapy (per session)",
            "Dental Cleaning",
        ]
    );
    // Source table untouched
    assert_eq!(data.procedures.len(), 15);
}

#[test]
fn test_invalid_page_leaves_render_state() {
    let mut shell = NavigationShell::new(Datasets::get());
    shell.select("Fraud Analysis").unwrap();
    let before = shell.plan().cloned().unwrap();

    let err = shell.select("Claims Explorer").unwrap_err();
    assert!(matches!(err, DashboardError::InvalidPage(_)));
    assert_eq!(shell.page(), Page::FraudAnalysis);
    assert_eq!(shell.plan(), Some(&before));
    assert!(shell.last_error().is_some());
}

#[test]
fn test_every_page_renders_from_shared_data() {
    let data = Datasets::get();
    let full = NavigationShell::full_range(data);

    for page in Page::ALL {
        let plan = render(page, data, &full).unwrap();
        assert_eq!(plan.page, page);
        assert!(!plan.sections.is_empty());
    }
    assert_eq!(*data, Datasets::build());
}

#[test]
fn test_overview_headlines() {
    let mut shell = NavigationShell::new(Datasets::get());
    let plan = shell.refresh().unwrap();

    assert_eq!(plan.metric("Total Claims").unwrap().value, "20,000,000");
    let fraud = plan.metric("Fraud Claims").unwrap();
    assert_eq!(fraud.value, "1,993,214");
    assert_eq!(fraud.delta.as_deref(), Some("9.97%"));
    assert_eq!(plan.metric("Regions Analyzed").unwrap().value, "13");
}

#[test]
fn test_procedure_filter_through_shell() {
    let mut shell = NavigationShell::with_page(Datasets::get(), Page::ProcedureAnalysis);
    let full = shell.plan().unwrap().chart("Average Cost per Procedure").unwrap().clone();
    assert_eq!(full.series[0].points.len(), 15);

    shell.set_filter(0.0, 1000.0).unwrap();
    let plan = shell.plan().unwrap();
    let cheap = plan.chart("Average Cost per Procedure").unwrap();
    assert_eq!(cheap.series[0].points.len(), 4);

    assert!(shell.set_filter(-1.0, 1000.0).is_err());
    assert_eq!(shell.filter().max(), 1000.0);
}

#[test]
fn test_plan_json_dump() {
    let data = Datasets::get();
    let plan = render(Page::RegionalAnalysis, data, &NavigationShell::full_range(data)).unwrap();
    let json = plan.to_json_pretty().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["page"], "Regional Analysis");
    assert_eq!(value["title"], "Regional Analysis");
    assert!(json.contains("Najran"));
}
