//! Panel renderers.
//!
//! One pure function per page turns the datasets (and, for the procedure
//! page, the cost filter) into a [`RenderPlan`]. Renderers only read the
//! tables.

mod fraud;
mod gender;
mod overview;
mod procedures;
mod regional;

pub mod format;
pub mod plan;

pub use plan::{
    palette, AxisBinding, ChartKind, ChartSpec, ColorEncoding, ColorScale, DataPoint, Metric,
    RenderPlan, Rgb, Section, Series,
};

use crate::analytics::CostRange;
use crate::error::DashboardResult;
use crate::models::Datasets;
use crate::navigation::Page;

/// Banner shown above every page.
pub const DASHBOARD_TITLE: &str = "Saudi Insurance Fraud Analysis Dashboard";

/// Render `page` from `data`. `filter` only affects the procedure page.
pub fn render(page: Page, data: &Datasets, filter: &CostRange) -> DashboardResult<RenderPlan> {
    log::debug!("Rendering page {page}");
    let mut plan = match page {
        Page::Overview => overview::render(data)?,
        Page::FraudAnalysis => fraud::render(&data.fraud)?,
        Page::GenderAnalysis => gender::render(&data.gender)?,
        Page::RegionalAnalysis => regional::render(&data.regions)?,
        Page::ProcedureAnalysis => procedures::render(&data.procedures, filter)?,
    };
    plan.sections.extend(footer());
    Ok(plan)
}

fn footer() -> [Section; 3] {
    [
        Section::Divider,
        Section::Caption("Data Source: Snowflake Data Analysis Project".to_string()),
        Section::Caption(format!(
            "{DASHBOARD_TITLE} - Comprehensive Healthcare Claims Analysis"
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_renders_with_footer() {
        let data = Datasets::build();
        let filter = CostRange::new(0.0, 100_000.0).unwrap();
        for page in Page::ALL {
            let plan = render(page, &data, &filter).unwrap();
            assert_eq!(plan.page, page);
            assert!(matches!(
                plan.sections.last(),
                Some(Section::Caption(text)) if text.starts_with(DASHBOARD_TITLE)
            ));
        }
    }

    #[test]
    fn test_rendering_does_not_touch_tables() {
        let data = Datasets::build();
        let before = data.clone();
        let filter = CostRange::new(0.0, 1000.0).unwrap();
        for page in Page::ALL {
            render(page, &data, &filter).unwrap();
        }
        assert_eq!(data, before);
    }
}
