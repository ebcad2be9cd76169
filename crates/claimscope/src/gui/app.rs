//! Main application window.

use eframe::egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use super::panels::{error_banner, NavigationPanel, PlanView};
use super::theme::DashboardTheme;
use crate::analytics::CostRange;
use crate::config::{DashboardConfig, ThemeChoice};
use crate::models::Datasets;
use crate::navigation::NavigationShell;
use crate::render::DASHBOARD_TITLE;

/// Main application state.
pub struct ClaimScopeApp {
    /// Page, filter and current plan.
    shell: NavigationShell<'static>,
    /// Sidebar controls.
    navigation: NavigationPanel,
    /// Visual theme.
    theme: DashboardTheme,
    /// Show the about window.
    show_about: bool,
}

impl ClaimScopeApp {
    /// Create a new application.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &DashboardConfig,
        filter: Option<CostRange>,
    ) -> Self {
        let theme = DashboardTheme::from_choice(config.theme);
        theme.apply(&cc.egui_ctx);

        let mut shell = NavigationShell::with_page(Datasets::get(), config.initial_page);
        if let Some(filter) = filter {
            let _ = shell.set_filter(filter.min(), filter.max());
        }
        let navigation = NavigationPanel::new(&shell);
        log::info!("Dashboard started on {}", shell.page());

        Self {
            shell,
            navigation,
            theme,
            show_about: false,
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, choice: ThemeChoice) {
        self.theme = DashboardTheme::from_choice(choice);
        self.theme.apply(ctx);
    }

    /// Render the top menu bar.
    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Refresh").clicked() {
                    let _ = self.shell.refresh();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Theme", |ui| {
                if ui.button("Dark").clicked() {
                    self.set_theme(ui.ctx(), ThemeChoice::Dark);
                    ui.close_menu();
                }
                if ui.button("Light").clicked() {
                    self.set_theme(ui.ctx(), ThemeChoice::Light);
                    ui.close_menu();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("v{}", crate::VERSION))
                        .small()
                        .color(self.theme.text_secondary),
                );
            });
        });
    }
}

impl eframe::App for ClaimScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui);
        });

        // Title banner
        TopBottomPanel::top("title").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.heading(
                    RichText::new(DASHBOARD_TITLE)
                        .size(26.0)
                        .strong()
                        .color(self.theme.accent),
                );
            });
            ui.add_space(6.0);
        });

        // Left panel - Navigation
        SidePanel::left("navigation")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.navigation.show(ui, &mut self.shell, &self.theme);
                });
            });

        // Central panel - current page
        CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.shell.last_error().map(str::to_owned) {
                if error_banner(ui, &message, &self.theme) {
                    self.shell.clear_error();
                }
                ui.add_space(6.0);
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.shell.plan() {
                    Some(plan) => PlanView::new(plan).show(ui, &self.theme),
                    None => {
                        ui.label(
                            RichText::new("Nothing rendered yet.").color(self.theme.text_secondary),
                        );
                    }
                });
        });

        if self.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .open(&mut self.show_about)
                .show(ctx, |ui| {
                    ui.label(RichText::new(DASHBOARD_TITLE).strong());
                    ui.label(format!("{} {}", crate::NAME, crate::VERSION));
                    ui.label("Aggregate healthcare claim statistics by fraud flag, gender, region and procedure.");
                });
        }
    }
}

/// Run the application, optionally starting with a narrowed cost filter.
pub fn run(config: DashboardConfig, filter: Option<CostRange>) -> eframe::Result<()> {
    let window = config.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([window.min_width, window.min_height])
            .with_title(DASHBOARD_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        "ClaimScope",
        options,
        Box::new(move |cc| Ok(Box::new(ClaimScopeApp::new(cc, &config, filter)))),
    )
}
