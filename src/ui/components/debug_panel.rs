use eframe::egui;

use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Status");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Responder:");
        ui.label(&state.responder_name);
    });

    ui.horizontal(|ui| {
        ui.label("Backend:");
        match state.backend_healthy {
            Some(true) => ui.colored_label(egui::Color32::GREEN, "● online"),
            Some(false) => ui.colored_label(egui::Color32::RED, "● offline"),
            None => ui.label("(checking...)"),
        };
    });

    ui.horizontal(|ui| {
        ui.label("Pending replies:");
        ui.label(format!("{}", state.pending.len()));
    });

    ui.separator();

    ui.label("Recent Events:");
    egui::ScrollArea::vertical()
        .max_height(200.0)
        .show(ui, |ui| {
            for event in state.debug_events.iter().rev().take(20) {
                let time_str = event.timestamp.format("%H:%M:%S");
                let color = match event.event_type.as_str() {
                    "HEALTH" | "PROGRESS" => egui::Color32::GREEN,
                    "REPLY_DROPPED" | "DELETED" => egui::Color32::RED,
                    "RECOMMENDATION" => egui::Color32::YELLOW,
                    _ => ui.visuals().text_color(),
                };

                ui.horizontal(|ui| {
                    ui.colored_label(color, format!("[{}]", time_str));
                    ui.label(&event.message);
                });
            }
        });
}
