//! Chart widgets that paint [`ChartSpec`]s with the egui painter.
//!
//! Provides:
//! - Pie (drawn as a donut with a legend)
//! - Horizontal bars with value labels
//! - Vertical and grouped bars
//! - Funnel

use eframe::egui::{self, Color32, Painter, Pos2, Rect, Response, Sense, Stroke, Vec2};
use std::f32::consts::PI;

use super::theme::{to_color32, DashboardTheme};
use crate::render::{ChartKind, ChartSpec};

const TITLE_HEIGHT: f32 = 18.0;

/// Widget painting one chart descriptor.
pub struct ChartView<'a> {
    chart: &'a ChartSpec,
}

impl<'a> ChartView<'a> {
    /// Wrap a chart descriptor.
    pub fn new(chart: &'a ChartSpec) -> Self {
        Self { chart }
    }

    /// Render the chart.
    pub fn show(&self, ui: &mut egui::Ui, theme: &DashboardTheme) -> Response {
        let height = self.chart.height.unwrap_or_else(|| self.default_height());
        let width = ui.available_width();
        let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
        let rect = response.rect;

        painter.text(
            Pos2::new(rect.left() + 5.0, rect.top()),
            egui::Align2::LEFT_TOP,
            &self.chart.title,
            egui::FontId::proportional(13.0),
            theme.text_primary,
        );

        let area = Rect::from_min_max(
            Pos2::new(rect.left(), rect.top() + TITLE_HEIGHT + 4.0),
            rect.max,
        );
        painter.rect_filled(area, 4.0, theme.chart_bg);

        if self.chart.is_empty() {
            painter.text(
                area.center(),
                egui::Align2::CENTER_CENTER,
                "No data",
                egui::FontId::proportional(11.0),
                theme.text_secondary,
            );
            return response;
        }

        let area = area.shrink(8.0);
        match self.chart.kind {
            ChartKind::Pie => self.paint_pie(&painter, area, theme),
            ChartKind::HorizontalBar => self.paint_horizontal_bars(&painter, area, theme),
            ChartKind::Bar | ChartKind::GroupedBar => self.paint_columns(&painter, area, theme),
            ChartKind::Funnel => self.paint_funnel(&painter, area, theme),
        }

        response
    }

    fn default_height(&self) -> f32 {
        match self.chart.kind {
            ChartKind::HorizontalBar => {
                let bars = self.chart.series.first().map_or(0, |s| s.points.len());
                TITLE_HEIGHT + 30.0 + bars.max(3) as f32 * 26.0
            }
            _ => 300.0,
        }
    }

    fn paint_pie(&self, painter: &Painter, area: Rect, theme: &DashboardTheme) {
        let Some(series) = self.chart.series.first() else {
            return;
        };
        let total: f64 = series.points.iter().map(|p| p.value).sum();
        if total <= 0.0 {
            return;
        }

        let radius = (area.height() / 2.0).min(area.width() / 3.0) - 4.0;
        let inner_radius = radius * 0.45;
        let center = Pos2::new(area.left() + radius + 10.0, area.center().y);
        let mut start_angle = -PI / 2.0;

        for (i, point) in series.points.iter().enumerate() {
            let sweep_angle = (point.value / total) as f32 * 2.0 * PI;
            let color = to_color32(self.chart.point_color(0, i));

            if sweep_angle > 0.01 {
                let steps = (sweep_angle * 30.0).max(8.0) as usize;
                for step in 0..steps {
                    let a1 = start_angle + sweep_angle * (step as f32 / steps as f32);
                    let a2 = start_angle + sweep_angle * ((step + 1) as f32 / steps as f32);
                    let at = |r: f32, a: f32| Pos2::new(center.x + r * a.cos(), center.y + r * a.sin());
                    painter.add(egui::Shape::convex_polygon(
                        vec![at(radius, a1), at(radius, a2), at(inner_radius, a2), at(inner_radius, a1)],
                        color,
                        Stroke::NONE,
                    ));
                }
            }

            // Share label at the middle of the slice
            let mid = start_angle + sweep_angle / 2.0;
            let label_r = (radius + inner_radius) / 2.0;
            painter.text(
                Pos2::new(center.x + label_r * mid.cos(), center.y + label_r * mid.sin()),
                egui::Align2::CENTER_CENTER,
                format!("{:.1}%", point.value / total * 100.0),
                egui::FontId::proportional(11.0),
                Color32::WHITE,
            );

            start_angle += sweep_angle;
        }

        if self.chart.show_legend {
            let legend_x = center.x + radius + 24.0;
            for (i, point) in series.points.iter().enumerate() {
                let y = area.top() + 10.0 + i as f32 * 18.0;
                painter.circle_filled(
                    Pos2::new(legend_x, y + 6.0),
                    5.0,
                    to_color32(self.chart.point_color(0, i)),
                );
                painter.text(
                    Pos2::new(legend_x + 10.0, y),
                    egui::Align2::LEFT_TOP,
                    &point.label,
                    egui::FontId::proportional(11.0),
                    theme.text_secondary,
                );
            }
        }
    }

    fn paint_horizontal_bars(&self, painter: &Painter, area: Rect, theme: &DashboardTheme) {
        let Some(series) = self.chart.series.first() else {
            return;
        };
        let max_val = series.points.iter().map(|p| p.value).fold(0.0_f64, f64::max).max(1.0);
        let label_width = (area.width() * 0.38).min(210.0);
        let value_width = 60.0;
        let bar_area_width = (area.width() - label_width - value_width).max(10.0);
        let n = series.points.len();
        if n == 0 {
            return;
        }
        let row_height = area.height() / n as f32;
        let bar_height = (row_height * 0.7).min(22.0);

        // First point at the bottom
        for (i, point) in series.points.iter().enumerate() {
            let row = (n - 1 - i) as f32;
            let y = area.top() + row * row_height + (row_height - bar_height) / 2.0;

            painter.text(
                Pos2::new(area.left() + label_width - 6.0, y + bar_height / 2.0),
                egui::Align2::RIGHT_CENTER,
                &point.label,
                egui::FontId::proportional(10.0),
                theme.text_primary,
            );

            let bar_width = ((point.value / max_val) as f32 * bar_area_width).max(2.0);
            let bar_rect = Rect::from_min_size(
                Pos2::new(area.left() + label_width, y),
                Vec2::new(bar_width, bar_height),
            );
            painter.rect_filled(bar_rect, 2.0, to_color32(self.chart.point_color(0, i)));

            painter.text(
                Pos2::new(bar_rect.right() + 5.0, y + bar_height / 2.0),
                egui::Align2::LEFT_CENTER,
                point.text.clone().unwrap_or_else(|| format_value(point.value)),
                egui::FontId::proportional(10.0),
                theme.text_secondary,
            );
        }
    }

    fn paint_columns(&self, painter: &Painter, area: Rect, theme: &DashboardTheme) {
        let Some(first) = self.chart.series.first() else {
            return;
        };
        let categories = first.points.len();
        if categories == 0 {
            return;
        }
        let series_count = self.chart.series.len();
        let max_val = self
            .chart
            .value_bounds()
            .map_or(1.0, |(_, hi)| hi)
            .max(f64::MIN_POSITIVE);

        let legend_height = if series_count > 1 && self.chart.show_legend { 18.0 } else { 0.0 };
        let plot = Rect::from_min_max(
            Pos2::new(area.left() + 4.0, area.top() + legend_height + 14.0),
            Pos2::new(area.right() - 4.0, area.bottom() - 16.0),
        );
        let group_width = plot.width() / categories as f32;
        let gap = group_width * 0.2;
        let bar_width = (group_width - gap) / series_count as f32;

        painter.line_segment(
            [plot.left_bottom(), plot.right_bottom()],
            Stroke::new(1.0, theme.grid_color),
        );

        for (c, category) in first.points.iter().enumerate() {
            let group_left = plot.left() + c as f32 * group_width + gap / 2.0;

            for (s, series) in self.chart.series.iter().enumerate() {
                let Some(point) = series.points.get(c) else {
                    continue;
                };
                let h = (point.value / max_val) as f32 * plot.height();
                let x = group_left + s as f32 * bar_width;
                let bar_rect = Rect::from_min_max(
                    Pos2::new(x, plot.bottom() - h),
                    Pos2::new(x + bar_width - 2.0, plot.bottom()),
                );
                painter.rect_filled(bar_rect, 2.0, to_color32(self.chart.point_color(s, c)));

                painter.text(
                    Pos2::new(bar_rect.center().x, bar_rect.top() - 2.0),
                    egui::Align2::CENTER_BOTTOM,
                    point.text.clone().unwrap_or_else(|| format_value(point.value)),
                    egui::FontId::proportional(10.0),
                    theme.text_secondary,
                );
            }

            painter.text(
                Pos2::new(group_left + (group_width - gap) / 2.0, plot.bottom() + 2.0),
                egui::Align2::CENTER_TOP,
                &category.label,
                egui::FontId::proportional(10.0),
                theme.text_primary,
            );
        }

        if legend_height > 0.0 {
            let mut x = area.left() + 4.0;
            for (s, series) in self.chart.series.iter().enumerate() {
                painter.rect_filled(
                    Rect::from_min_size(Pos2::new(x, area.top() + 3.0), Vec2::splat(10.0)),
                    2.0,
                    to_color32(self.chart.point_color(s, 0)),
                );
                let galley_end = painter.text(
                    Pos2::new(x + 14.0, area.top()),
                    egui::Align2::LEFT_TOP,
                    &series.name,
                    egui::FontId::proportional(11.0),
                    theme.text_secondary,
                );
                x = galley_end.right() + 16.0;
            }
        }

        if let Some(title) = &self.chart.y.title {
            painter.text(
                Pos2::new(area.right(), area.top() + legend_height),
                egui::Align2::RIGHT_TOP,
                title,
                egui::FontId::proportional(9.0),
                theme.text_secondary,
            );
        }
    }

    fn paint_funnel(&self, painter: &Painter, area: Rect, theme: &DashboardTheme) {
        let Some(series) = self.chart.series.first() else {
            return;
        };
        let max_val = series.points.iter().map(|p| p.value).fold(0.0_f64, f64::max).max(1.0);
        if series.points.is_empty() {
            return;
        }
        let label_width = 120.0;
        let stage_area = Rect::from_min_max(Pos2::new(area.left() + label_width, area.top()), area.max);
        let row_height = stage_area.height() / series.points.len() as f32;
        let bar_height = row_height * 0.75;

        for (i, point) in series.points.iter().enumerate() {
            let y = stage_area.top() + i as f32 * row_height + (row_height - bar_height) / 2.0;
            let w = ((point.value / max_val) as f32 * stage_area.width()).max(2.0);
            let bar_rect = Rect::from_center_size(
                Pos2::new(stage_area.center().x, y + bar_height / 2.0),
                Vec2::new(w, bar_height),
            );
            painter.rect_filled(bar_rect, 2.0, to_color32(self.chart.point_color(0, i)));

            let caption = match &point.text {
                Some(text) => format!("{} ({})", format_value(point.value), text),
                None => format_value(point.value),
            };
            painter.text(
                bar_rect.center(),
                egui::Align2::CENTER_CENTER,
                caption,
                egui::FontId::proportional(10.0),
                Color32::WHITE,
            );
            painter.text(
                Pos2::new(area.left() + label_width - 6.0, y + bar_height / 2.0),
                egui::Align2::RIGHT_CENTER,
                &point.label,
                egui::FontId::proportional(10.0),
                theme.text_primary,
            );
        }
    }
}

/// Format value with K/M suffix.
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if abs >= 10.0 || value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
