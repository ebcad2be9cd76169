//! # ClaimScope
//!
//! Insurance claim fraud analysis dashboard over pre-aggregated healthcare
//! claim statistics.
//!
//! Four summary tables (fraud flag, gender, region, procedure) are built
//! once and shared read-only. Each dashboard page is a pure function from
//! those tables to a [`render::RenderPlan`], which the egui front-end paints
//! and the headless mode serializes to JSON.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌────────────────┐
//! │    Datasets     │────▶│ Panel Renderers  │────▶│  Render Plan   │
//! │ (OnceLock, r/o) │     │ (one per page)   │     │ (plain data)   │
//! └─────────────────┘     └──────────────────┘     └────────────────┘
//!         │                        ▲                       │
//!         ▼                        │                       ▼
//! ┌─────────────────┐     ┌──────────────────┐     ┌────────────────┐
//! │    Analytics    │     │ Navigation Shell │     │ egui / JSON    │
//! │ sum, top_n, ... │     │ page + filter    │     │ front-ends     │
//! └─────────────────┘     └──────────────────┘     └────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use claimscope::prelude::*;
//!
//! let mut shell = NavigationShell::new(Datasets::get());
//! shell.select("Regional Analysis").unwrap();
//!
//! let plan = shell.plan().unwrap();
//! assert_eq!(plan.metric("Highest Claims").unwrap().value, "1,541,848");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analytics;
pub mod config;
pub mod error;
pub mod gui;
pub mod models;
pub mod navigation;
pub mod render;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::models::{
        // Tables
        Datasets, Row, Table,
        // Rows
        FraudIndicator, FraudRow, FraudSummary, Gender, GenderRow, GenderSummary,
        ProcedureRow, ProcedureSummary, RegionRow, RegionSummary,
        // Columns
        FraudColumn, GenderColumn, ProcedureColumn, RegionColumn,
    };

    pub use crate::analytics::{
        difference, filter_range, max_column, mean_column, min_column, percentage,
        sort_by_column, sum_column, top_n, CostRange,
    };

    pub use crate::config::{DashboardConfig, ThemeChoice, WindowConfig};
    pub use crate::error::{DashboardError, DashboardResult};
    pub use crate::navigation::{NavigationShell, Page};
    pub use crate::render::{
        render, ChartKind, ChartSpec, DataPoint, Metric, RenderPlan, Section, Series,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
