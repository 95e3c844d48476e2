use eframe::egui;

use crate::ui::state::AuthForm;

/// Sign-in form. Returns true when submitted.
pub fn render(ui: &mut egui::Ui, form: &mut AuthForm) -> bool {
    let mut submit = false;

    ui.heading("Sign in");
    ui.label("Your student ID links your sessions to the study's progress records.");
    ui.add_space(8.0);

    egui::Grid::new("auth_form").num_columns(2).show(ui, |ui| {
        ui.label("Student ID");
        ui.text_edit_singleline(&mut form.student_id);
        ui.end_row();

        ui.label("Name");
        let response = ui.text_edit_singleline(&mut form.name);
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        ui.end_row();
    });

    ui.checkbox(
        &mut form.consent,
        "I agree that my anonymised debugging sessions may be used for research",
    );

    if let Some(error) = &form.error {
        ui.colored_label(egui::Color32::RED, error);
    }

    if ui.button("Continue").clicked() {
        submit = true;
    }

    submit
}
