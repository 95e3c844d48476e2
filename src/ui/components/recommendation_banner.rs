use eframe::egui;

use crate::common::{Priority, RecommendedTask};

pub enum BannerAction {
    Start,
    Dismiss,
}

pub fn render(ui: &mut egui::Ui, task: &RecommendedTask) -> Option<BannerAction> {
    let mut action = None;
    let accent = match task.priority {
        Priority::High => egui::Color32::from_rgb(230, 126, 34),
        Priority::Medium => egui::Color32::YELLOW,
        Priority::Low => egui::Color32::GRAY,
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.colored_label(accent, "★ Recommended");
            ui.strong(&task.title);
        });
        ui.label(egui::RichText::new(&task.reason).weak());
        ui.horizontal(|ui| {
            if ui.button("Start challenge").clicked() {
                action = Some(BannerAction::Start);
            }
            if ui.button("Dismiss").clicked() {
                action = Some(BannerAction::Dismiss);
            }
        });
    });

    action
}
