//! Severity summary bar chart, painted directly.

use client_core::SeverityAggregate;
use eframe::egui;

use crate::ui::theme;

const CHART_HEIGHT: f32 = 300.0;
const AXIS_GUTTER: f32 = 36.0;
const LABEL_BAND: f32 = 24.0;
const TICKS: usize = 4;

/// Axis maximum: the largest count rounded up to a multiple of the tick count,
/// never below one step per tick.
fn axis_max(max_count: usize) -> usize {
    max_count.max(1).div_ceil(TICKS) * TICKS
}

pub fn show_severity_chart(ui: &mut egui::Ui, aggregate: &SeverityAggregate) {
    let width = ui.available_width().max(320.0);
    let (rect, _response) =
        ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let font = egui::FontId::proportional(13.0);

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + AXIS_GUTTER, rect.top() + 16.0),
        egui::pos2(rect.right() - 8.0, rect.bottom() - LABEL_BAND),
    );
    let axis = egui::Stroke::new(1.0, theme::AXIS_STROKE);
    painter.line_segment([plot.left_top(), plot.left_bottom()], axis);
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);

    let top = axis_max(aggregate.max_count());
    for tick in 0..=TICKS {
        let value = top * tick / TICKS;
        let y = plot.bottom() - plot.height() * tick as f32 / TICKS as f32;
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            value.to_string(),
            font.clone(),
            text_color,
        );
        if tick > 0 {
            painter.line_segment(
                [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
                egui::Stroke::new(0.5, theme::AXIS_STROKE.gamma_multiply(0.4)),
            );
        }
    }

    let series = aggregate.chart_series();
    let slot = plot.width() / series.len() as f32;
    for (i, (label, count)) in series.iter().enumerate() {
        let center_x = plot.left() + slot * (i as f32 + 0.5);
        let bar_height = plot.height() * *count as f32 / top as f32;
        let bar = egui::Rect::from_min_max(
            egui::pos2(center_x - slot * 0.3, plot.bottom() - bar_height),
            egui::pos2(center_x + slot * 0.3, plot.bottom()),
        );
        painter.rect_filled(bar, 2.0, theme::BAR_FILL);
        painter.text(
            egui::pos2(center_x, bar.top() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            count.to_string(),
            font.clone(),
            text_color,
        );
        painter.text(
            egui::pos2(center_x, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            *label,
            font.clone(),
            text_color,
        );
    }

    if aggregate.unrecognized() > 0 {
        ui.small(format!(
            "{} result(s) carried an unrecognized severity label and are not charted.",
            aggregate.unrecognized()
        ));
    }
}
