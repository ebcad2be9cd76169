//! Fraud analysis page.

use super::format::{currency, thousands};
use super::plan::{
    palette, AxisBinding, ChartKind, ChartSpec, ColorEncoding, DataPoint, Metric, RenderPlan,
    Section, Series,
};
use crate::analytics::{difference, percentage, sum_column};
use crate::error::DashboardResult;
use crate::models::{FraudColumn, FraudSummary};
use crate::navigation::Page;

/// Currency units represented by one unit of payment ratio in the excess
/// payment estimate.
const EXCESS_PAYMENT_SCALE: f64 = 1000.0;

pub(super) fn render(fraud: &FraudSummary) -> DashboardResult<RenderPlan> {
    let normal = fraud.normal();
    let fraudulent = fraud.fraudulent();
    let total = sum_column(fraud.rows(), FraudColumn::Total)?;

    let ratio_diff = difference(fraudulent.avg_payment_ratio, normal.avg_payment_ratio);
    let ratio_increase = percentage(ratio_diff, normal.avg_payment_ratio)?;
    let estimated_loss = fraudulent.total as f64 * ratio_diff * EXCESS_PAYMENT_SCALE;

    let ratio_chart = ChartSpec::new(
        ChartKind::Bar,
        "Average Payment Ratio: Normal vs Fraudulent Claims",
    )
    .x(AxisBinding::new("CLAIM_TYPE").titled("Claim Type"))
    .y(AxisBinding::new("AVG_PAYMENT_RATIO").titled("Payment Ratio"))
    .color(ColorEncoding::Discrete {
        colors: vec![palette::NORMAL, palette::FRAUD],
    })
    .series(Series::new(
        "AVG_PAYMENT_RATIO",
        vec![
            DataPoint::new("Normal Claims", normal.avg_payment_ratio)
                .with_text(format!("{:.4}", normal.avg_payment_ratio)),
            DataPoint::new("Fraudulent Claims", fraudulent.avg_payment_ratio)
                .with_text(format!("{:.4}", fraudulent.avg_payment_ratio)),
        ],
    ))
    .without_legend();

    let funnel_stage = |label: &str, count: u64| -> DashboardResult<DataPoint> {
        let share = percentage(count as f64, total)?;
        Ok(DataPoint::new(label, count as f64).with_text(format!("{share:.1}%")))
    };
    let funnel = ChartSpec::new(ChartKind::Funnel, "Fraud Detection Funnel")
        .x(AxisBinding::new("Count"))
        .y(AxisBinding::new("Metric"))
        .color(ColorEncoding::Discrete {
            colors: palette::RED_BLUE.to_vec(),
        })
        .series(Series::new(
            "Count",
            vec![
                funnel_stage("Total Claims", total as u64)?,
                funnel_stage("Fraudulent Claims", fraudulent.total)?,
                funnel_stage("Clean Claims", normal.total)?,
            ],
        ));

    let mut plan = RenderPlan::new(Page::FraudAnalysis, "Fraud Analysis");
    plan.push(Section::columns(vec![
        vec![
            Section::Subheading("Fraud Detection Metrics".to_string()),
            Section::Chart(ratio_chart),
            Section::Subheading("Key Insights".to_string()),
            Section::Bullets(vec![
                format!("Fraudulent claims have {ratio_diff:.2} higher payment ratio"),
                format!("This represents a {ratio_increase:.1}% increase"),
                format!("{} fraudulent claims detected", thousands(fraudulent.total)),
            ]),
        ],
        vec![
            Section::Subheading("Fraud Impact Analysis".to_string()),
            Section::Chart(funnel),
            Section::Subheading("Financial Impact".to_string()),
            Section::Metrics(vec![Metric::new(
                "Estimated Excess Payment",
                currency(estimated_loss),
            )]),
        ],
    ]));

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Datasets;

    #[test]
    fn test_key_insights() {
        let plan = render(&Datasets::build().fraud).unwrap();
        let insights = plan.list_under("Key Insights").unwrap();
        assert_eq!(insights[0], "Fraudulent claims have 0.48 higher payment ratio");
        assert_eq!(insights[1], "This represents a 48.0% increase");
        assert_eq!(insights[2], "1,993,214 fraudulent claims detected");
    }

    #[test]
    fn test_ratio_chart_labels() {
        let plan = render(&Datasets::build().fraud).unwrap();
        let chart = plan
            .chart("Average Payment Ratio: Normal vs Fraudulent Claims")
            .unwrap();
        let texts: Vec<_> = chart.series[0]
            .points
            .iter()
            .map(|p| p.text.clone().unwrap())
            .collect();
        assert_eq!(texts, vec!["1.0000", "1.4798"]);
    }

    #[test]
    fn test_funnel_stages() {
        let plan = render(&Datasets::build().fraud).unwrap();
        let funnel = plan.chart("Fraud Detection Funnel").unwrap();
        let stages: Vec<(&str, f64, &str)> = funnel.series[0]
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.value, p.text.as_deref().unwrap()))
            .collect();
        assert_eq!(
            stages,
            vec![
                ("Total Claims", 20_000_000.0, "100.0%"),
                ("Fraudulent Claims", 1_993_214.0, "10.0%"),
                ("Clean Claims", 18_006_786.0, "90.0%"),
            ]
        );
    }

    #[test]
    fn test_estimated_excess_payment() {
        let plan = render(&Datasets::build().fraud).unwrap();
        let metric = plan.metric("Estimated Excess Payment").unwrap();
        assert!(metric.value.starts_with("$956,243,896."));
    }

    #[test]
    fn test_zero_claims_is_division_error() {
        let empty = FraudSummary::new((1.0, 0), (1.2, 0));
        assert!(matches!(
            render(&empty),
            Err(crate::error::DashboardError::DivisionByZero { .. })
        ));
    }
}
