use eframe::egui;

use crate::ui::state::Page;

/// Landing page. Returns the page picked from its call-to-action buttons.
pub fn home(ui: &mut egui::Ui, signed_in: bool) -> Option<Page> {
    let mut next = None;
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.heading("PyTutor");
        ui.label("An AI debugging tutor for novice Python programmers.");
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if ui.button("Start debugging").clicked() {
                next = Some(if signed_in { Page::Chat } else { Page::Auth });
            }
            if ui.button("Browse challenges").clicked() {
                next = Some(Page::Challenges);
            }
        });
    });

    ui.add_space(24.0);
    ui.columns(3, |columns| {
        feature(
            &mut columns[0],
            "Guided hints",
            "Explains what went wrong without handing over the answer.",
        );
        feature(
            &mut columns[1],
            "Syntax checks",
            "Spots missing colons on if, for and def lines.",
        );
        feature(
            &mut columns[2],
            "Practice",
            "Six buggy programs to fix, from loops to recursion.",
        );
    });
    next
}

fn feature(ui: &mut egui::Ui, title: &str, body: &str) {
    ui.strong(title);
    ui.label(body);
}

pub fn about(ui: &mut egui::Ui) {
    ui.heading("About");
    ui.label(
        "PyTutor pairs a conversational tutor with a small set of debugging challenges. \
         Replies come either from a built-in offline responder or from the tutoring \
         backend, which also recommends the next challenge and explains which lines \
         drove its answer.",
    );
}

pub fn contact(ui: &mut egui::Ui) {
    ui.heading("Contact");
    ui.label("Questions about the tutor, your account or the study?");
    for (topic, address) in [
        ("General", "info@phychat.ai"),
        ("Support", "support@phychat.ai"),
        ("Research", "research@phychat.ai"),
    ] {
        ui.horizontal(|ui| {
            ui.label(topic);
            ui.hyperlink_to(address, format!("mailto:{address}"));
        });
    }
}
