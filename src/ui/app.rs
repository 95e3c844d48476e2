use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{TutorCommand, TutorEvent};
use crate::preferences::Theme;

use super::components::challenges_panel::ChallengeAction;
use super::components::recommendation_banner::BannerAction;
use super::components::sidebar::SidebarAction;
use super::components::top_bar::NavAction;
use super::components::{
    auth_panel, challenges_panel, chat_area, debug_panel, input_bar, pages, profile_panel,
    recommendation_banner, sidebar, top_bar,
};
use super::state::{AppState, Page};

pub struct TutorApp {
    state: AppState,
    command_sender: mpsc::Sender<TutorCommand>,
    event_receiver: mpsc::Receiver<TutorEvent>,
}

impl TutorApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        state: AppState,
        command_sender: mpsc::Sender<TutorCommand>,
        event_receiver: mpsc::Receiver<TutorEvent>,
    ) -> Self {
        let mut app = Self {
            state,
            command_sender,
            event_receiver,
        };
        app.send_command(TutorCommand::CheckHealth);
        let user_id = app.state.user_id();
        app.send_command(TutorCommand::FetchRecommendation { user_id });
        app
    }

    fn handle_tutor_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn send_command(&mut self, command: TutorCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to tutor worker: {err}");
            self.state
                .add_debug_event("SEND_FAILED".to_string(), err.to_string());
        }
    }

    fn send_optional(&mut self, command: Option<TutorCommand>) {
        if let Some(command) = command {
            self.send_command(command);
        }
    }

    fn chat_page(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("session_sidebar").show(ctx, |ui| {
            let action = sidebar::render(
                ui,
                self.state.store.conversations(),
                self.state.store.current_id(),
            );
            match action {
                Some(SidebarAction::New) => self.state.new_conversation(),
                Some(SidebarAction::Select(id)) => self.state.select_conversation(&id),
                Some(SidebarAction::Delete(id)) => self.state.delete_conversation(&id),
                None => {}
            }
        });

        egui::SidePanel::right("status_panel").show(ctx, |ui| {
            debug_panel::render(ui, &self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(task) = &self.state.recommendation {
                match recommendation_banner::render(ui, task) {
                    Some(BannerAction::Start) => {
                        let command = self.state.accept_recommendation();
                        self.send_optional(command);
                    }
                    Some(BannerAction::Dismiss) => self.state.dismiss_recommendation(),
                    None => {}
                }
                ui.separator();
            }

            let explain = chat_area::render(
                ui,
                self.state.store.current(),
                self.state.is_waiting_for_reply(),
                self.state.last_explanation.as_ref(),
            );
            if let Some(request) = explain {
                let command = self.state.explain(&request.code, &request.prediction);
                self.send_command(command);
            }

            ui.separator();
            let state = &mut self.state;
            if input_bar::render(
                ui,
                &mut state.input_text,
                &mut state.code_input,
                &mut state.show_code_box,
            ) {
                let command = self.state.submit();
                self.send_optional(command);
            }
        });
    }

    fn challenges_page(&mut self, ui: &mut egui::Ui) {
        match challenges_panel::render(ui, &mut self.state) {
            Some(ChallengeAction::RevealHint {
                challenge_id,
                total,
            }) => self.state.reveal_hint(&challenge_id, total),
            Some(ChallengeAction::Start(challenge)) => {
                let command = self.state.start_challenge(&challenge);
                self.send_optional(command);
            }
            Some(ChallengeAction::Complete(challenge_id)) => {
                let command = self.state.complete_challenge(&challenge_id);
                self.send_command(command);
            }
            None => {}
        }
    }
}

impl eframe::App for TutorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_tutor_events();

        ctx.set_visuals(match self.state.theme.theme() {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        });

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            let user = self.state.display_name();
            match top_bar::render(ui, self.state.page, self.state.theme.theme(), &user) {
                Some(NavAction::Go(page)) => self.state.page = page,
                Some(NavAction::ToggleTheme) => self.state.toggle_theme(),
                None => {}
            }
        });

        match self.state.page {
            Page::Chat => self.chat_page(ctx),
            page => {
                egui::CentralPanel::default().show(ctx, |ui| match page {
                    Page::Home => {
                        if let Some(next) = pages::home(ui, self.state.session.is_some()) {
                            self.state.page = next;
                        }
                    }
                    Page::Auth => {
                        if auth_panel::render(ui, &mut self.state.auth_form) && self.state.sign_in()
                        {
                            let user_id = self.state.user_id();
                            self.send_command(TutorCommand::FetchRecommendation { user_id });
                        }
                    }
                    Page::Challenges => self.challenges_page(ui),
                    Page::Profile => {
                        if profile_panel::render(ui, &self.state) {
                            self.state.sign_out();
                        }
                    }
                    Page::Contact => pages::contact(ui),
                    Page::About => pages::about(ui),
                    Page::Chat => {}
                });
            }
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
