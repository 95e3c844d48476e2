use eframe::egui;

use crate::common::{Conversation, Role};
use crate::tutor::CodeExplanation;

/// Request highlights for `code`, given the reply it produced.
pub struct ExplainRequest {
    pub code: String,
    pub prediction: String,
}

pub fn render(
    ui: &mut egui::Ui,
    conversation: Option<&Conversation>,
    waiting: bool,
    explanation: Option<&CodeExplanation>,
) -> Option<ExplainRequest> {
    let mut request = None;

    let Some(conversation) = conversation.filter(|c| !c.messages.is_empty()) else {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Stuck on a Python bug?");
            ui.label("Describe what goes wrong and paste the code. The tutor will point you at it.");
        });
        return None;
    };

    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .max_height(ui.available_height() - 90.0)
        .show(ui, |ui| {
            let mut last_code: Option<&str> = None;
            for message in &conversation.messages {
                let (who, color) = match message.role {
                    Role::User => ("You", egui::Color32::LIGHT_BLUE),
                    Role::Assistant => ("Tutor", egui::Color32::LIGHT_GREEN),
                    Role::System => ("System", egui::Color32::GRAY),
                };

                ui.horizontal(|ui| {
                    ui.colored_label(color, who);
                    ui.label(
                        egui::RichText::new(message.timestamp.format("%H:%M").to_string())
                            .weak()
                            .small(),
                    );
                });
                if !message.content.is_empty() {
                    ui.label(&message.content);
                }
                if let Some(code) = &message.code_snippet {
                    let mut shown = code.as_str();
                    ui.add(egui::TextEdit::multiline(&mut shown).code_editor());
                    last_code = Some(code);
                }
                if let Some(text) = &message.explanation {
                    ui.label(egui::RichText::new(text).italics().weak());
                }
                if message.role == Role::Assistant {
                    if let Some(code) = last_code.take() {
                        if ui.small_button("Why this line?").clicked() {
                            request = Some(ExplainRequest {
                                code: code.to_string(),
                                prediction: message.content.clone(),
                            });
                        }
                    }
                }
                ui.add_space(8.0);
            }

            if waiting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Tutor is thinking...");
                });
            }
        });

    if let Some(explanation) = explanation {
        ui.separator();
        ui.label(egui::RichText::new(&explanation.text).strong());
        if !explanation.highlighted_lines.is_empty() {
            let lines: Vec<String> = explanation
                .highlighted_lines
                .iter()
                .map(|line| line.to_string())
                .collect();
            ui.label(format!("Look at line(s): {}", lines.join(", ")));
        }
        for (feature, weight) in &explanation.feature_importance {
            ui.add(egui::ProgressBar::new(*weight as f32).text(feature.as_str()));
        }
    }

    request
}
