//! Visual theme for the dashboard GUI.

use eframe::egui::{self, Color32, Rounding};

use crate::config::ThemeChoice;
use crate::render::Rgb;

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct DashboardTheme {
    /// Background behind charts.
    pub chart_bg: Color32,
    /// Panel background.
    pub panel_bg: Color32,
    /// Metric card background.
    pub card_bg: Color32,
    /// Gridline / empty-bar color.
    pub grid_color: Color32,
    /// Text color.
    pub text_primary: Color32,
    /// Secondary text color.
    pub text_secondary: Color32,
    /// Accent color for headings and selection.
    pub accent: Color32,
    /// Positive metric deltas.
    pub delta_color: Color32,
    /// Informational note fill.
    pub note_bg: Color32,
    /// Error banner fill.
    pub error_bg: Color32,
    /// Error banner text.
    pub error_text: Color32,
    /// Panel rounding.
    pub panel_rounding: Rounding,
}

impl Default for DashboardTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl DashboardTheme {
    /// Create a dark theme (default).
    pub fn dark() -> Self {
        Self {
            chart_bg: Color32::from_rgb(25, 25, 35),
            panel_bg: Color32::from_rgb(28, 28, 36),
            card_bg: Color32::from_rgb(38, 40, 52),
            grid_color: Color32::from_rgb(40, 40, 50),
            text_primary: Color32::from_rgb(240, 240, 245),
            text_secondary: Color32::from_rgb(140, 140, 155),
            accent: Color32::from_rgb(31, 119, 180),
            delta_color: Color32::from_rgb(102, 187, 106),
            note_bg: Color32::from_rgb(24, 48, 78),
            error_bg: Color32::from_rgb(90, 28, 28),
            error_text: Color32::from_rgb(255, 170, 170),
            panel_rounding: Rounding::same(8.0),
        }
    }

    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            chart_bg: Color32::from_rgb(250, 250, 252),
            panel_bg: Color32::from_rgb(248, 249, 250),
            card_bg: Color32::from_rgb(240, 242, 246),
            grid_color: Color32::from_rgb(220, 220, 230),
            text_primary: Color32::from_rgb(30, 30, 40),
            text_secondary: Color32::from_rgb(100, 100, 115),
            accent: Color32::from_rgb(31, 119, 180),
            delta_color: Color32::from_rgb(56, 142, 60),
            note_bg: Color32::from_rgb(220, 235, 250),
            error_bg: Color32::from_rgb(255, 225, 225),
            error_text: Color32::from_rgb(160, 30, 30),
            panel_rounding: Rounding::same(8.0),
        }
    }

    /// Theme for a configured choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Whether this is a dark theme.
    pub fn is_dark(&self) -> bool {
        self.panel_bg.r() < 128
    }

    /// Apply theme to egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        style.visuals = if self.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        style.visuals.panel_fill = self.panel_bg;
        style.visuals.window_fill = self.panel_bg;
        style.visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        style.visuals.selection.bg_fill = self.accent;
        style.visuals.window_rounding = self.panel_rounding;

        ctx.set_style(style);
    }
}

/// Convert a plan color to an egui color.
pub fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}
