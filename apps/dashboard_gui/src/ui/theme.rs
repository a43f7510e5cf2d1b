//! Dashboard palette.

use client_core::PresentationBucket;
use eframe::egui;

pub const ROW_TEXT: egui::Color32 = egui::Color32::from_rgb(33, 37, 41);
pub const BAR_FILL: egui::Color32 = egui::Color32::from_rgb(136, 132, 216);
pub const AXIS_STROKE: egui::Color32 = egui::Color32::from_rgb(102, 102, 102);
pub const ERROR_BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
pub const ERROR_BANNER_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

pub fn bucket_fill(bucket: PresentationBucket) -> egui::Color32 {
    match bucket {
        PresentationBucket::Alert => egui::Color32::from_rgb(248, 215, 218),
        PresentationBucket::Caution => egui::Color32::from_rgb(255, 243, 205),
        PresentationBucket::Notice => egui::Color32::from_rgb(209, 236, 241),
        PresentationBucket::Clear => egui::Color32::from_rgb(212, 237, 218),
    }
}
