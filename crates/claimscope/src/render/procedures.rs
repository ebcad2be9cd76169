//! Medical procedure analysis page, restricted by the cost filter.

use super::format::{currency, thousands};
use super::plan::{
    AxisBinding, ChartKind, ChartSpec, ColorEncoding, ColorScale, DataPoint, RenderPlan, Section,
    Series,
};
use crate::analytics::{filter_range, sort_by_column, top_n, CostRange};
use crate::error::DashboardResult;
use crate::models::{ProcedureColumn, ProcedureRow, ProcedureSummary, Row};
use crate::navigation::Page;

const SUMMARY_SIZE: usize = 3;

pub(super) fn render(
    procedures: &ProcedureSummary,
    filter: &CostRange,
) -> DashboardResult<RenderPlan> {
    let filtered = filter_range(procedures.rows(), ProcedureColumn::AvgPaid, filter);
    let rows = filtered.rows();

    let mut plan = RenderPlan::new(Page::ProcedureAnalysis, "Medical Procedure Analysis");
    plan.push(Section::Caption(format!(
        "Cost range {} to {}: {} of {} procedures",
        currency(filter.min()),
        currency(filter.max()),
        filtered.len(),
        procedures.len()
    )));
    if filtered.is_empty() {
        plan.push(Section::Note(
            "No procedures fall within the selected cost range.".to_string(),
        ));
    }

    let cost_bars = bar_chart(
        "Average Cost per Procedure",
        rows,
        ProcedureColumn::AvgPaid,
        ColorScale::Plasma,
    );
    let volume_bars = bar_chart(
        "Total Procedures Performed",
        rows,
        ProcedureColumn::Total,
        ColorScale::Blues,
    );
    plan.push(Section::columns(vec![
        vec![
            Section::Subheading("Procedure Costs".to_string()),
            Section::Chart(cost_bars),
        ],
        vec![
            Section::Subheading("Procedure Volume".to_string()),
            Section::Chart(volume_bars),
        ],
    ]));
    plan.push(Section::Divider);
    plan.push(Section::Subheading("Procedure Analysis Summary".to_string()));

    let cost_line = |r: &ProcedureRow| format!("{}: {}", r.procedure, currency(r.avg_paid));
    let volume_line = |r: &ProcedureRow| format!("{}: {}", r.procedure, thousands(r.total));
    let list = |column: ProcedureColumn, ascending: bool, line: &dyn Fn(&ProcedureRow) -> String| {
        top_n(rows, column, SUMMARY_SIZE, ascending)
            .into_iter()
            .map(line)
            .collect::<Vec<_>>()
    };

    plan.push(Section::columns(vec![
        vec![
            Section::Subheading("Most Expensive".to_string()),
            Section::Bullets(list(ProcedureColumn::AvgPaid, false, &cost_line)),
        ],
        vec![
            Section::Subheading("Most Common".to_string()),
            Section::Bullets(list(ProcedureColumn::Total, false, &volume_line)),
        ],
        vec![
            Section::Subheading("Cost-Effective".to_string()),
            Section::Bullets(list(ProcedureColumn::AvgPaid, true, &cost_line)),
        ],
    ]));

    Ok(plan)
}

/// Horizontal bars sorted ascending so the largest value sits on top.
fn bar_chart(
    title: &str,
    rows: &[ProcedureRow],
    column: ProcedureColumn,
    scale: ColorScale,
) -> ChartSpec {
    let points = sort_by_column(rows, column, true)
        .into_iter()
        .map(|r| DataPoint::new(r.procedure.as_str(), r.value(column)))
        .collect();

    ChartSpec::new(ChartKind::HorizontalBar, title)
        .x(AxisBinding::new(column.name()))
        .y(AxisBinding::new("PROCEDURE"))
        .color(ColorEncoding::Continuous {
            field: column.name().to_string(),
            scale,
        })
        .series(Series::new(column.name(), points))
        .height(600.0)
        .without_legend()
}
