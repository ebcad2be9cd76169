//! GUI front-end for the claims dashboard.
//!
//! Built with egui for cross-platform immediate mode rendering.
//!
//! ## Components
//!
//! - **NavigationPanel**: Page selector and procedure cost range
//! - **PlanView**: Paints a render plan section by section
//! - **ChartView**: Donut, bar, grouped bar and funnel charts

pub mod app;
pub mod charts;
pub mod panels;
pub mod theme;

pub use app::{run, ClaimScopeApp};
pub use charts::ChartView;
pub use panels::{NavigationPanel, PlanView};
pub use theme::DashboardTheme;
