use eframe::egui;

/// Text line plus an optional code box. Returns true when the user asked to
/// send; blank input is filtered by the caller.
pub fn render(
    ui: &mut egui::Ui,
    input_text: &mut String,
    code_input: &mut String,
    show_code_box: &mut bool,
) -> bool {
    let mut send = false;

    if *show_code_box {
        ui.label("Python code");
        ui.add(
            egui::TextEdit::multiline(code_input)
                .code_editor()
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .hint_text("Paste the code you are stuck on"),
        );
    }

    ui.horizontal(|ui| {
        let label = if *show_code_box { "Hide code" } else { "</> Code" };
        if ui.button(label).clicked() {
            *show_code_box = !*show_code_box;
        }

        let response = ui.add(
            egui::TextEdit::singleline(input_text)
                .hint_text("Describe your bug or ask a question...")
                .desired_width(ui.available_width() - 60.0),
        );
        if ui.button("Send").clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    send
}
