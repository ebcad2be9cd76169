//! Gender-based analysis page.

use super::format::{currency, thousands};
use super::plan::{
    palette, AxisBinding, ChartKind, ChartSpec, ColorEncoding, DataPoint, RenderPlan, Section,
    Series,
};
use crate::analytics::difference;
use crate::error::DashboardResult;
use crate::models::{Gender, GenderSummary};
use crate::navigation::Page;

pub(super) fn render(gender: &GenderSummary) -> DashboardResult<RenderPlan> {
    let rows = gender.rows();

    let pie = ChartSpec::new(ChartKind::Pie, "Distribution of Claims by Gender")
        .x(AxisBinding::new("GENDER"))
        .y(AxisBinding::new("COUNT"))
        .color(ColorEncoding::Discrete {
            colors: vec![palette::FEMALE, palette::MALE],
        })
        .series(Series::new(
            "COUNT",
            rows.iter()
                .map(|r| DataPoint::new(r.gender.label(), r.count as f64))
                .collect(),
        ));

    let mut left = vec![
        Section::Subheading("Claims Distribution by Gender".to_string()),
        Section::Chart(pie),
        Section::Subheading("Gender Metrics".to_string()),
    ];
    for row in rows {
        left.push(Section::Strong(format!("{}:", row.gender)));
        left.push(Section::Bullets(vec![
            format!("Total Claims: {}", thousands(row.count)),
            format!("Avg Claim: {}", currency(row.avg_claim)),
            format!("Avg Paid: {}", currency(row.avg_paid)),
        ]));
    }

    let series = |name: &str, color, value: fn(&crate::models::GenderRow) -> f64| {
        Series::new(
            name,
            rows.iter()
                .map(|r| DataPoint::new(r.gender.label(), value(r)))
                .collect(),
        )
        .color(color)
    };
    let comparison = ChartSpec::new(ChartKind::GroupedBar, "Average Claim vs Average Paid by Gender")
        .x(AxisBinding::new("GENDER"))
        .y(AxisBinding::new("AMOUNT").titled("Amount ($)"))
        .color(ColorEncoding::PerSeries)
        .series(series("Average Claim", palette::LIGHT_BLUE, |r| r.avg_claim))
        .series(series("Average Paid", palette::LIGHT_CORAL, |r| r.avg_paid));

    let male = gender.get(Gender::Male);
    let female = gender.get(Gender::Female);
    let claim_diff = difference(male.avg_claim, female.avg_claim);
    let paid_diff = difference(male.avg_paid, female.avg_paid);

    let right = vec![
        Section::Subheading("Average Amounts by Gender".to_string()),
        Section::Chart(comparison),
        Section::Subheading("Gender Analysis Insights".to_string()),
        Section::Bullets(vec![
            format!("Male claims are {} higher on average", currency(claim_diff)),
            format!("Male payments are {} higher on average", currency(paid_diff)),
            "Claims distribution is nearly equal between genders".to_string(),
        ]),
    ];

    let mut plan = RenderPlan::new(Page::GenderAnalysis, "Gender-Based Analysis");
    plan.push(Section::columns(vec![left, right]));
    Ok(plan)
}
