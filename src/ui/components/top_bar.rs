use eframe::egui;

use crate::preferences::Theme;
use crate::ui::state::Page;

pub enum NavAction {
    Go(Page),
    ToggleTheme,
}

pub fn render(ui: &mut egui::Ui, current: Page, theme: Theme, user: &str) -> Option<NavAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.strong("🐍 PyTutor");
        ui.separator();
        for page in Page::ALL {
            if ui.selectable_label(current == page, page.label()).clicked() {
                action = Some(NavAction::Go(page));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let icon = match theme {
                Theme::Dark => "☀",
                Theme::Light => "🌙",
            };
            if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                action = Some(NavAction::ToggleTheme);
            }
            ui.label(user);
        });
    });
    action
}
