//! Color-coded results table.

use client_core::{DashboardView, RowView};
use eframe::egui;

use crate::ui::theme;

const ROW_HEIGHT: f32 = 22.0;
const COLUMNS: [(&str, f32); 10] = [
    ("ID", 48.0),
    ("Account", 80.0),
    ("Description", 200.0),
    ("Amount", 80.0),
    ("Distance", 72.0),
    ("Rule Flag", 64.0),
    ("Explanation", 260.0),
    ("Anomaly Flag", 84.0),
    ("Anomaly Score", 96.0),
    ("Severity", 96.0),
];

fn row_cells(row: &RowView) -> [&str; 10] {
    [
        &row.id,
        &row.account_number,
        &row.description,
        &row.amount,
        &row.distance,
        &row.rule_flag,
        &row.explanation,
        &row.anomaly_flag,
        &row.anomaly_score,
        &row.severity,
    ]
}

fn cell(ui: &mut egui::Ui, width: f32, text: egui::RichText) {
    ui.add_sized([width, ROW_HEIGHT], egui::Label::new(text).truncate());
}

pub fn show_results_table(ui: &mut egui::Ui, view: &DashboardView) {
    egui::ScrollArea::horizontal()
        .id_salt("results_table_scroll")
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(6.0, 1.0);

                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .inner_margin(egui::Margin::symmetric(6, 2))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for (title, width) in COLUMNS {
                                cell(ui, width, egui::RichText::new(title).strong());
                            }
                        });
                    });

                for row in &view.rows {
                    egui::Frame::NONE
                        .fill(theme::bucket_fill(row.bucket))
                        .inner_margin(egui::Margin::symmetric(6, 2))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                for ((_, width), value) in COLUMNS.iter().zip(row_cells(row)) {
                                    cell(ui, *width, egui::RichText::new(value).color(theme::ROW_TEXT));
                                }
                            })
                            .response
                            .on_hover_text(row.explanation.as_str());
                        });
                }
            });
        });
}
