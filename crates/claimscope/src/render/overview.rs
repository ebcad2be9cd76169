//! Overview page: executive summary.

use super::format::{currency, thousands};
use super::plan::{
    palette, AxisBinding, ChartKind, ChartSpec, ColorEncoding, ColorScale, DataPoint, Metric,
    RenderPlan, Section, Series,
};
use crate::analytics::{mean_column, percentage, sum_column, top_n};
use crate::error::DashboardResult;
use crate::models::{Datasets, FraudColumn, ProcedureColumn, Row};
use crate::navigation::Page;

pub(super) fn render(data: &Datasets) -> DashboardResult<RenderPlan> {
    let total_claims = sum_column(data.fraud.rows(), FraudColumn::Total)?;
    let fraud_claims = data.fraud.fraudulent().total;
    let fraud_rate = percentage(fraud_claims as f64, total_claims)?;
    let avg_procedure_cost = mean_column(data.procedures.rows(), ProcedureColumn::AvgPaid)?;

    let mut plan = RenderPlan::new(Page::Overview, "Executive Summary");
    plan.push(Section::Metrics(vec![
        Metric::new("Total Claims", thousands(total_claims as u64)),
        Metric::new("Fraud Claims", thousands(fraud_claims)).with_delta(format!("{fraud_rate:.2}%")),
        Metric::new("Avg Procedure Cost", currency(avg_procedure_cost)),
        Metric::new("Regions Analyzed", data.regions.len().to_string()),
    ]));
    plan.push(Section::Divider);

    let split = data
        .fraud
        .rows()
        .iter()
        .map(|r| DataPoint::new(r.label(), r.total as f64))
        .collect();
    let pie = ChartSpec::new(ChartKind::Pie, "Distribution of Claims by Type")
        .x(AxisBinding::new("CLAIM_TYPE"))
        .y(AxisBinding::new("TOTAL"))
        .color(ColorEncoding::Discrete {
            colors: vec![palette::NORMAL, palette::FRAUD],
        })
        .series(Series::new("Claims", split));

    let expensive = top_n(data.procedures.rows(), ProcedureColumn::AvgPaid, 5, false)
        .into_iter()
        .map(|r| DataPoint::new(r.label(), r.avg_paid))
        .collect();
    let bars = ChartSpec::new(ChartKind::HorizontalBar, "Average Cost per Procedure")
        .x(AxisBinding::new("AVG_PAID"))
        .y(AxisBinding::new("PROCEDURE"))
        .color(ColorEncoding::Continuous {
            field: "AVG_PAID".to_string(),
            scale: ColorScale::Viridis,
        })
        .series(Series::new("AVG_PAID", expensive))
        .without_legend();

    plan.push(Section::columns(vec![
        vec![
            Section::Subheading("Fraud vs Normal Claims".to_string()),
            Section::Chart(pie),
        ],
        vec![
            Section::Subheading("Top 5 Most Expensive Procedures".to_string()),
            Section::Chart(bars),
        ],
    ]));

    Ok(plan)
}
