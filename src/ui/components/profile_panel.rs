use eframe::egui;

use crate::ui::state::AppState;

/// Returns true when sign-out was clicked.
pub fn render(ui: &mut egui::Ui, state: &AppState) -> bool {
    let summary = state.store.summary();

    ui.heading(format!("{}'s progress", state.display_name()));
    ui.separator();

    egui::Grid::new("profile_summary")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            ui.label("Student ID");
            ui.label(state.user_id());
            ui.end_row();

            ui.label("Debugging sessions");
            ui.label(summary.total_sessions.to_string());
            ui.end_row();

            ui.label("Questions asked");
            ui.label(summary.questions_asked.to_string());
            ui.end_row();

            ui.label("Challenges solved");
            ui.label(state.completed_challenges.len().to_string());
            ui.end_row();

            ui.label("Last activity");
            match summary.last_activity {
                Some(at) => ui.label(at.format("%Y-%m-%d %H:%M").to_string()),
                None => ui.label("never"),
            };
            ui.end_row();
        });

    ui.add_space(12.0);
    state.session.is_some() && ui.button("Sign out").clicked()
}
