//! Navigation shell: current page, cost filter, last rendered plan.
//!
//! The shell is the only mutable state in the dashboard. Each interaction
//! either commits a new state and its freshly rendered plan, or records an
//! error and leaves the previous state in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analytics::CostRange;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Datasets, ProcedureColumn};
use crate::render::{self, RenderPlan};

/// Dashboard pages, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Page {
    /// Executive summary.
    #[default]
    #[serde(rename = "Overview")]
    Overview,
    /// Payment ratios of fraudulent vs normal claims.
    #[serde(rename = "Fraud Analysis")]
    FraudAnalysis,
    /// Claim volumes and amounts by gender.
    #[serde(rename = "Gender Analysis")]
    GenderAnalysis,
    /// Claim totals per region.
    #[serde(rename = "Regional Analysis")]
    RegionalAnalysis,
    /// Procedure costs and volumes.
    #[serde(rename = "Procedure Analysis")]
    ProcedureAnalysis,
}

impl Page {
    /// All pages in menu order.
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::FraudAnalysis,
        Page::GenderAnalysis,
        Page::RegionalAnalysis,
        Page::ProcedureAnalysis,
    ];

    /// Menu name.
    pub fn name(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::FraudAnalysis => "Fraud Analysis",
            Page::GenderAnalysis => "Gender Analysis",
            Page::RegionalAnalysis => "Regional Analysis",
            Page::ProcedureAnalysis => "Procedure Analysis",
        }
    }

    /// Whether the page reads the cost filter.
    pub fn uses_filter(self) -> bool {
        self == Page::ProcedureAnalysis
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| DashboardError::InvalidPage(s.to_string()))
    }
}

/// Page selection state plus the plan rendered for it.
pub struct NavigationShell<'a> {
    datasets: &'a Datasets,
    page: Page,
    filter: CostRange,
    plan: Option<RenderPlan>,
    last_error: Option<String>,
}

impl<'a> NavigationShell<'a> {
    /// Shell on the Overview page with the full cost range.
    pub fn new(datasets: &'a Datasets) -> Self {
        Self::with_page(datasets, Page::default())
    }

    /// Shell starting on `page` with the full cost range, already rendered.
    pub fn with_page(datasets: &'a Datasets, page: Page) -> Self {
        let mut shell = Self {
            datasets,
            page,
            filter: Self::full_range(datasets),
            plan: None,
            last_error: None,
        };
        // A failure is kept in `last_error` for the front-end to show.
        let _ = shell.refresh();
        shell
    }

    /// `[0, max(AVG_PAID)]` over all procedures.
    pub fn full_range(datasets: &Datasets) -> CostRange {
        CostRange::covering(datasets.procedures.rows(), ProcedureColumn::AvgPaid)
    }

    /// Select a page by its menu name.
    ///
    /// Unknown names are rejected with [`DashboardError::InvalidPage`]; the
    /// current page and plan are kept.
    pub fn select(&mut self, name: &str) -> DashboardResult<&RenderPlan> {
        match name.parse::<Page>() {
            Ok(page) => self.navigate(page),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Switch to `page` and render it.
    pub fn navigate(&mut self, page: Page) -> DashboardResult<&RenderPlan> {
        if page != self.page {
            log::info!("Navigating from {} to {}", self.page, page);
        }
        self.commit(page, self.filter)
    }

    /// Replace the cost filter. The plan is re-rendered when the current
    /// page reads the filter.
    pub fn set_filter(&mut self, min: f64, max: f64) -> DashboardResult<()> {
        let filter = match CostRange::new(min, max) {
            Ok(filter) => filter,
            Err(e) => return Err(self.fail(e)),
        };
        if filter == self.filter && self.plan.is_some() {
            self.last_error = None;
            return Ok(());
        }
        if self.page.uses_filter() {
            self.commit(self.page, filter)?;
        } else {
            self.filter = filter;
            self.last_error = None;
        }
        Ok(())
    }

    /// Re-render the current state.
    pub fn refresh(&mut self) -> DashboardResult<&RenderPlan> {
        self.commit(self.page, self.filter)
    }

    /// Current page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Current cost filter.
    pub fn filter(&self) -> CostRange {
        self.filter
    }

    /// Tables the shell renders from.
    pub fn datasets(&self) -> &'a Datasets {
        self.datasets
    }

    /// Plan of the last successful render.
    pub fn plan(&self) -> Option<&RenderPlan> {
        self.plan.as_ref()
    }

    /// Message of the last failed interaction, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Dismiss the current error message.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn commit(&mut self, page: Page, filter: CostRange) -> DashboardResult<&RenderPlan> {
        match render::render(page, self.datasets, &filter) {
            Ok(plan) => {
                self.page = page;
                self.filter = filter;
                self.last_error = None;
                Ok(self.plan.insert(plan))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, error: DashboardError) -> DashboardError {
        log::warn!("Interaction rejected on {}: {}", self.page, error);
        self.last_error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names_parse() {
        for page in Page::ALL {
            assert_eq!(page.name().parse::<Page>().unwrap(), page);
        }
        assert!(matches!(
            "overview".parse::<Page>(),
            Err(DashboardError::InvalidPage(_))
        ));
    }

    #[test]
    fn test_default_state() {
        let data = Datasets::build();
        let shell = NavigationShell::new(&data);
        assert_eq!(shell.page(), Page::Overview);
        assert_eq!(shell.plan().unwrap().page, Page::Overview);
        assert_eq!(shell.filter().max(), 99_050.94);
        assert!(shell.last_error().is_none());
    }

    #[test]
    fn test_invalid_page_keeps_state() {
        let data = Datasets::build();
        let mut shell = NavigationShell::new(&data);
        shell.select("Regional Analysis").unwrap();
        let before = shell.plan().cloned();

        let err = shell.select("Billing").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidPage(ref name) if name == "Billing"));
        assert_eq!(shell.page(), Page::RegionalAnalysis);
        assert_eq!(shell.plan().cloned(), before);
        assert_eq!(shell.last_error(), Some("Invalid page: \"Billing\""));

        // The session stays usable.
        shell.select("Gender Analysis").unwrap();
        assert_eq!(shell.page(), Page::GenderAnalysis);
        assert!(shell.last_error().is_none());
    }

    #[test]
    fn test_filter_rerenders_procedure_page() {
        let data = Datasets::build();
        let mut shell = NavigationShell::with_page(&data, Page::ProcedureAnalysis);
        shell.set_filter(0.0, 1000.0).unwrap();

        let plan = shell.plan().unwrap();
        let chart = plan.chart("Average Cost per Procedure").unwrap();
        assert_eq!(chart.series[0].points.len(), 4);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let data = Datasets::build();
        let mut shell = NavigationShell::with_page(&data, Page::ProcedureAnalysis);
        let before = shell.filter();

        let err = shell.set_filter(5000.0, 1000.0).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
        assert_eq!(shell.filter(), before);
        assert!(shell.last_error().unwrap().starts_with("Invalid range"));
    }

    #[test]
    fn test_unchanged_filter_clears_error() {
        let data = Datasets::build();
        let mut shell = NavigationShell::with_page(&data, Page::ProcedureAnalysis);
        let current = shell.filter();

        assert!(shell.set_filter(5000.0, 1000.0).is_err());
        assert!(shell.last_error().is_some());

        shell.set_filter(current.min(), current.max()).unwrap();
        assert_eq!(shell.filter(), current);
        assert!(shell.last_error().is_none());
    }

    #[test]
    fn test_filter_survives_navigation() {
        let data = Datasets::build();
        let mut shell = NavigationShell::new(&data);
        shell.set_filter(0.0, 1000.0).unwrap();
        assert_eq!(shell.plan().unwrap().page, Page::Overview);

        shell.navigate(Page::ProcedureAnalysis).unwrap();
        let plan = shell.plan().unwrap();
        assert_eq!(
            plan.chart("Total Procedures Performed").unwrap().series[0].points.len(),
            4
        );
    }
}
