//! Insurance claim fraud analysis dashboard.
//!
//! Opens the egui dashboard, or with `--dump` renders one page headlessly
//! and prints its render plan as JSON.
//!
//! # Examples
//!
//! ```bash
//! # Start on the procedure page with a narrowed cost range
//! claimscope --page "Procedure Analysis" --min 0 --max 20000
//!
//! # Print the regional page as JSON
//! claimscope --page "Regional Analysis" --dump
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use claimscope::analytics::CostRange;
use claimscope::config::{DashboardConfig, ThemeChoice};
use claimscope::error::DashboardResult;
use claimscope::models::Datasets;
use claimscope::navigation::{NavigationShell, Page};

/// Saudi insurance fraud analysis dashboard
#[derive(Parser)]
#[command(name = "claimscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page to open, by menu name (e.g. "Fraud Analysis")
    #[arg(short, long)]
    page: Option<String>,

    /// Lower bound of the procedure cost filter
    #[arg(long)]
    min: Option<f64>,

    /// Upper bound of the procedure cost filter
    #[arg(long)]
    max: Option<f64>,

    /// Color theme (dark or light)
    #[arg(long)]
    theme: Option<ThemeChoice>,

    /// Render the page once and print the plan as JSON
    #[arg(long)]
    dump: bool,
}

/// Merge the configuration file with command-line overrides.
fn load_config(cli: &Cli) -> DashboardResult<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(page) = &cli.page {
        config.initial_page = page.parse::<Page>()?;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    Ok(config)
}

/// Cost filter requested on the command line, if any bound was given.
fn requested_filter(cli: &Cli, data: &Datasets) -> DashboardResult<Option<CostRange>> {
    if cli.min.is_none() && cli.max.is_none() {
        return Ok(None);
    }
    let full = NavigationShell::full_range(data);
    let filter = CostRange::new(cli.min.unwrap_or(full.min()), cli.max.unwrap_or(full.max()))?;
    Ok(Some(filter))
}

fn dump(config: &DashboardConfig, filter: Option<CostRange>) -> DashboardResult<()> {
    let mut shell = NavigationShell::with_page(Datasets::get(), config.initial_page);
    if let Some(filter) = filter {
        shell.set_filter(filter.min(), filter.max())?;
    }
    let plan = shell.refresh()?;
    println!("{}", plan.to_json_pretty()?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .init();

    log::info!("Starting {} v{}", claimscope::NAME, claimscope::VERSION);

    let filter = match requested_filter(&cli, Datasets::get()) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.dump {
        return match dump(&config, filter) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match claimscope::gui::run(config, filter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("GUI terminated: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
