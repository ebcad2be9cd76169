//! Regional analysis page.

use super::format::{grouped, thousands};
use super::plan::{
    AxisBinding, ChartKind, ChartSpec, ColorEncoding, ColorScale, DataPoint, Metric, RenderPlan,
    Section, Series,
};
use crate::analytics::{max_column, mean_column, min_column, sort_by_column, top_n};
use crate::error::DashboardResult;
use crate::models::{RegionColumn, RegionRow, RegionSummary};
use crate::navigation::Page;

const RANKED_REGIONS: usize = 3;

pub(super) fn render(regions: &RegionSummary) -> DashboardResult<RenderPlan> {
    let rows = regions.rows();
    let (_, max_claims) = max_column(rows, RegionColumn::TotalClaims)?;
    let (_, min_claims) = min_column(rows, RegionColumn::TotalClaims)?;
    let avg_claims = mean_column(rows, RegionColumn::TotalClaims)?;

    let bars = ChartSpec::new(ChartKind::HorizontalBar, "Total Claims by Region")
        .x(AxisBinding::new("TOTAL_CLAIMS"))
        .y(AxisBinding::new("REGION"))
        .color(ColorEncoding::Continuous {
            field: "TOTAL_CLAIMS".to_string(),
            scale: ColorScale::Viridis,
        })
        .series(Series::new(
            "TOTAL_CLAIMS",
            sort_by_column(rows, RegionColumn::TotalClaims, true)
                .into_iter()
                .map(|r| DataPoint::new(r.region.as_str(), r.total_claims as f64))
                .collect(),
        ))
        .height(500.0)
        .without_legend();

    let numbered = |ranked: Vec<&RegionRow>| {
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}: {}", i + 1, r.region, thousands(r.total_claims)))
            .collect::<Vec<_>>()
    };

    let insights = vec![
        Section::Subheading("Regional Insights".to_string()),
        Section::Metrics(vec![
            Metric::new("Highest Claims", grouped(max_claims, 0)),
            Metric::new("Lowest Claims", grouped(min_claims, 0)),
            Metric::new("Average Claims", grouped(avg_claims, 0)),
        ]),
        Section::Subheading("Top 3 Regions".to_string()),
        Section::Numbered(numbered(top_n(
            rows,
            RegionColumn::TotalClaims,
            RANKED_REGIONS,
            false,
        ))),
        Section::Subheading("Bottom 3 Regions".to_string()),
        Section::Numbered(numbered(top_n(
            rows,
            RegionColumn::TotalClaims,
            RANKED_REGIONS,
            true,
        ))),
    ];

    let mut plan = RenderPlan::new(Page::RegionalAnalysis, "Regional Analysis");
    plan.push(Section::Columns {
        weights: vec![2.0, 1.0],
        columns: vec![
            vec![
                Section::Subheading("Claims by Region".to_string()),
                Section::Chart(bars),
            ],
            insights,
        ],
    });
    plan.push(Section::Divider);
    plan.push(Section::Note(
        "Note: All regions currently show 0% fraud rate, indicating either effective fraud \
         prevention or potential gaps in fraud detection systems."
            .to_string(),
    ));
    Ok(plan)
}
