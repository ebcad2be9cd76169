//! UI panels: navigation sidebar and render plan view.

use super::charts::ChartView;
use super::theme::DashboardTheme;
use crate::navigation::{NavigationShell, Page};
use crate::render::{Metric, RenderPlan, Section};
use eframe::egui::{self, Color32, RichText, Ui};

/// Slider step for the cost range, in currency units.
pub const COST_STEP: f64 = 1000.0;

/// Sidebar with the page selector and, on the procedure page, the cost range.
pub struct NavigationPanel {
    /// Page currently shown in the combo box.
    selected: Page,
    /// Slider lower bound.
    min_cost: f64,
    /// Slider upper bound.
    max_cost: f64,
}

impl NavigationPanel {
    /// Create a panel mirroring the shell state.
    pub fn new(shell: &NavigationShell<'_>) -> Self {
        let filter = shell.filter();
        Self {
            selected: shell.page(),
            min_cost: filter.min(),
            max_cost: filter.max(),
        }
    }

    /// Render the panel and forward interactions to the shell.
    pub fn show(&mut self, ui: &mut Ui, shell: &mut NavigationShell<'_>, theme: &DashboardTheme) {
        ui.vertical(|ui| {
            ui.heading(RichText::new("Navigation").color(theme.text_primary));
            ui.separator();

            ui.label(RichText::new("Choose Analysis").color(theme.text_secondary));
            egui::ComboBox::from_id_salt("page_select")
                .selected_text(self.selected.name())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for page in Page::ALL {
                        ui.selectable_value(&mut self.selected, page, page.name());
                    }
                });

            if self.selected != shell.page() {
                // Errors are kept in the shell and shown as a banner.
                let _ = shell.navigate(self.selected);
                self.selected = shell.page();
            }

            if shell.page().uses_filter() {
                ui.add_space(10.0);
                self.cost_range(ui, shell, theme);
            }
        });
    }

    fn cost_range(&mut self, ui: &mut Ui, shell: &mut NavigationShell<'_>, theme: &DashboardTheme) {
        let upper = NavigationShell::full_range(shell.datasets()).max();

        ui.label(RichText::new("Cost Range ($)").color(theme.text_secondary));
        let min_changed = ui
            .add(
                egui::Slider::new(&mut self.min_cost, 0.0..=upper)
                    .step_by(COST_STEP)
                    .text("Min"),
            )
            .changed();
        let max_changed = ui
            .add(
                egui::Slider::new(&mut self.max_cost, 0.0..=upper)
                    .step_by(COST_STEP)
                    .text("Max"),
            )
            .changed();

        if max_changed {
            self.max_cost = snap_to_upper(self.max_cost, upper);
        }

        if ui.button("Reset").clicked() {
            self.min_cost = 0.0;
            self.max_cost = upper;
            self.apply_filter(shell);
        } else if min_changed || max_changed {
            self.apply_filter(shell);
        }

        let filter = shell.filter();
        ui.label(
            RichText::new(format!("{:.0} to {:.0}", filter.min(), filter.max()))
                .small()
                .color(theme.text_secondary),
        );
    }

    fn apply_filter(&mut self, shell: &mut NavigationShell<'_>) {
        if shell.set_filter(self.min_cost, self.max_cost).is_err() {
            let filter = shell.filter();
            self.min_cost = filter.min();
            self.max_cost = filter.max();
        }
    }
}

/// Stepped sliders stop short of an upper bound that is not a multiple of
/// [`COST_STEP`]; values within half a step of it snap to the bound.
fn snap_to_upper(value: f64, upper: f64) -> f64 {
    if value >= upper - COST_STEP / 2.0 {
        upper
    } else {
        value
    }
}

/// Paints a [`RenderPlan`] top to bottom.
pub struct PlanView<'a> {
    plan: &'a RenderPlan,
}

impl<'a> PlanView<'a> {
    /// Wrap a plan.
    pub fn new(plan: &'a RenderPlan) -> Self {
        Self { plan }
    }

    /// Render the plan.
    pub fn show(&self, ui: &mut Ui, theme: &DashboardTheme) {
        ui.heading(
            RichText::new(&self.plan.title)
                .size(22.0)
                .strong()
                .color(theme.text_primary),
        );
        ui.add_space(8.0);
        show_sections(ui, &self.plan.sections, theme);
    }
}

fn show_sections(ui: &mut Ui, sections: &[Section], theme: &DashboardTheme) {
    for section in sections {
        show_section(ui, section, theme);
    }
}

fn show_section(ui: &mut Ui, section: &Section, theme: &DashboardTheme) {
    match section {
        Section::Subheading(text) => {
            ui.add_space(6.0);
            ui.label(RichText::new(text).size(17.0).strong().color(theme.text_primary));
            ui.add_space(2.0);
        }
        Section::Strong(text) => {
            ui.label(RichText::new(text).strong().color(theme.text_primary));
        }
        Section::Metrics(metrics) => metric_row(ui, metrics, theme),
        Section::Chart(chart) => {
            ChartView::new(chart).show(ui, theme);
            ui.add_space(6.0);
        }
        Section::Bullets(items) => {
            for item in items {
                ui.label(RichText::new(format!("\u{2022} {}", item)).color(theme.text_primary));
            }
        }
        Section::Numbered(items) => {
            for item in items {
                ui.label(RichText::new(item).color(theme.text_primary));
            }
        }
        Section::Note(text) => note(ui, text, theme.note_bg, theme.text_primary),
        Section::Caption(text) => {
            ui.label(RichText::new(text).small().color(theme.text_secondary));
        }
        Section::Divider => {
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);
        }
        Section::Columns { weights, columns } => column_row(ui, weights, columns, theme),
    }
}

fn metric_row(ui: &mut Ui, metrics: &[Metric], theme: &DashboardTheme) {
    if metrics.is_empty() {
        return;
    }
    ui.columns(metrics.len(), |cols| {
        for (col, metric) in cols.iter_mut().zip(metrics) {
            egui::Frame::none()
                .fill(theme.card_bg)
                .inner_margin(10.0)
                .rounding(theme.panel_rounding)
                .show(col, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(&metric.label).small().color(theme.text_secondary));
                    ui.label(RichText::new(&metric.value).size(22.0).color(theme.text_primary));
                    if let Some(delta) = &metric.delta {
                        ui.label(RichText::new(format!("\u{2191} {}", delta)).color(theme.delta_color));
                    }
                });
        }
    });
    ui.add_space(8.0);
}

fn column_row(ui: &mut Ui, weights: &[f32], columns: &[Vec<Section>], theme: &DashboardTheme) {
    if columns.is_empty() {
        return;
    }
    let total: f32 = weights.iter().sum::<f32>().max(f32::EPSILON);
    let spacing = ui.spacing().item_spacing.x;
    let width = ui.available_width() - spacing * (columns.len() - 1) as f32;

    ui.horizontal_top(|ui| {
        for (i, column) in columns.iter().enumerate() {
            let weight = weights.get(i).copied().unwrap_or(1.0);
            let col_width = width * weight / total;
            ui.allocate_ui_with_layout(
                egui::vec2(col_width, 0.0),
                egui::Layout::top_down(egui::Align::Min),
                |ui| {
                    ui.set_width(col_width);
                    show_sections(ui, column, theme);
                },
            );
        }
    });
}

fn note(ui: &mut Ui, text: &str, fill: Color32, color: Color32) {
    egui::Frame::none()
        .fill(fill)
        .inner_margin(10.0)
        .rounding(4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).color(color));
        });
}

/// Red banner for the last failed interaction. Returns true when dismissed.
pub fn error_banner(ui: &mut Ui, message: &str, theme: &DashboardTheme) -> bool {
    let mut dismissed = false;
    egui::Frame::none()
        .fill(theme.error_bg)
        .inner_margin(8.0)
        .rounding(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message).strong().color(theme.error_text));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("x").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Datasets;

    #[test]
    fn test_navigation_panel_mirrors_shell() {
        let data = Datasets::build();
        let shell = NavigationShell::with_page(&data, Page::ProcedureAnalysis);
        let panel = NavigationPanel::new(&shell);
        assert_eq!(panel.selected, Page::ProcedureAnalysis);
        assert_eq!(panel.min_cost, 0.0);
        assert_eq!(panel.max_cost, 99_050.94);
    }

    #[test]
    fn test_rejected_filter_resyncs_sliders() {
        let data = Datasets::build();
        let mut shell = NavigationShell::with_page(&data, Page::ProcedureAnalysis);
        let mut panel = NavigationPanel::new(&shell);

        panel.min_cost = 50_000.0;
        panel.max_cost = 1_000.0;
        panel.apply_filter(&mut shell);

        assert_eq!(panel.min_cost, 0.0);
        assert_eq!(panel.max_cost, 99_050.94);
        assert!(shell.last_error().is_some());
    }

    #[test]
    fn test_accepted_filter_reaches_shell() {
        let data = Datasets::build();
        let mut shell = NavigationShell::with_page(&data, Page::ProcedureAnalysis);
        let mut panel = NavigationPanel::new(&shell);

        panel.max_cost = COST_STEP;
        panel.apply_filter(&mut shell);
        assert_eq!(shell.filter().max(), 1000.0);
    }

    #[test]
    fn test_slider_end_keeps_most_expensive_procedure() {
        let data = Datasets::build();
        let mut shell = NavigationShell::with_page(&data, Page::ProcedureAnalysis);
        let mut panel = NavigationPanel::new(&shell);
        let upper = NavigationShell::full_range(&data).max();

        panel.max_cost = 20_000.0;
        panel.apply_filter(&mut shell);

        // Far right of a 1000-step slider
        panel.max_cost = snap_to_upper(99_000.0, upper);
        panel.apply_filter(&mut shell);
        assert_eq!(shell.filter().max(), 99_050.94);
        let chart = shell.plan().unwrap().chart("Average Cost per Procedure").unwrap();
        assert_eq!(chart.series[0].points.len(), 15);

        assert_eq!(snap_to_upper(98_000.0, upper), 98_000.0);
    }
}
