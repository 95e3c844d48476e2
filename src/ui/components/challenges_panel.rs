use eframe::egui;

use crate::challenges::{self, DifficultyFilter};
use crate::common::{Challenge, Difficulty};
use crate::ui::state::AppState;

pub enum ChallengeAction {
    RevealHint { challenge_id: String, total: usize },
    Start(Challenge),
    Complete(String),
}

fn difficulty_color(difficulty: Difficulty) -> egui::Color32 {
    match difficulty {
        Difficulty::Easy => egui::Color32::GREEN,
        Difficulty::Medium => egui::Color32::YELLOW,
        Difficulty::Hard => egui::Color32::RED,
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<ChallengeAction> {
    let mut action = None;

    ui.heading("Debugging Challenges");
    ui.horizontal(|ui| {
        ui.label("Difficulty:");
        for choice in DifficultyFilter::CHOICES {
            ui.selectable_value(&mut state.challenge_filter, choice, choice.label());
        }
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for challenge in challenges::filtered(state.challenge_filter) {
            let solved = challenge.completed || state.completed_challenges.contains(&challenge.id);
            let shown = state.hints_shown(&challenge.id);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.strong(&challenge.title);
                    ui.colored_label(
                        difficulty_color(challenge.difficulty),
                        challenge.difficulty.as_str(),
                    );
                    ui.label(egui::RichText::new(&challenge.category).weak());
                    if solved {
                        ui.colored_label(egui::Color32::GREEN, "✔ solved");
                    }
                });
                ui.label(&challenge.description);
                let mut code = challenge.buggy_code.as_str();
                ui.add(egui::TextEdit::multiline(&mut code).code_editor());

                for hint in challenge.hints.iter().take(shown) {
                    ui.label(format!("💡 {hint}"));
                }

                ui.horizontal(|ui| {
                    if shown < challenge.hints.len() && ui.button("Show hint").clicked() {
                        action = Some(ChallengeAction::RevealHint {
                            challenge_id: challenge.id.clone(),
                            total: challenge.hints.len(),
                        });
                    }
                    if ui.button("Debug with tutor").clicked() {
                        action = Some(ChallengeAction::Start(challenge.clone()));
                    }
                    if !solved && ui.button("Mark solved").clicked() {
                        action = Some(ChallengeAction::Complete(challenge.id.clone()));
                    }
                });
            });
        }
    });

    action
}
