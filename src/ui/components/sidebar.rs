use eframe::egui;

use crate::common::{Conversation, ConversationId};

pub enum SidebarAction {
    New,
    Select(ConversationId),
    Delete(ConversationId),
}

pub fn render(
    ui: &mut egui::Ui,
    conversations: &[Conversation],
    current: Option<&ConversationId>,
) -> Option<SidebarAction> {
    let mut action = None;

    ui.heading("Sessions");
    if ui.button("➕ New session").clicked() {
        action = Some(SidebarAction::New);
    }
    ui.separator();

    if conversations.is_empty() {
        ui.label(egui::RichText::new("No debugging sessions yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for conversation in conversations {
            let selected = current == Some(&conversation.id);
            ui.horizontal(|ui| {
                let title = if conversation.title.is_empty() {
                    "(code only)"
                } else {
                    conversation.title.as_str()
                };
                if ui.selectable_label(selected, title).clicked() {
                    action = Some(SidebarAction::Select(conversation.id.clone()));
                }
                if ui.small_button("🗑").on_hover_text("Delete session").clicked() {
                    action = Some(SidebarAction::Delete(conversation.id.clone()));
                }
            });
            ui.label(
                egui::RichText::new(format!(
                    "{} messages · {}",
                    conversation.messages.len(),
                    conversation.updated_at.format("%b %d %H:%M")
                ))
                .weak()
                .small(),
            );
        }
    });

    action
}
