pub mod auth_panel;
pub mod challenges_panel;
pub mod chat_area;
pub mod debug_panel;
pub mod input_bar;
pub mod pages;
pub mod profile_panel;
pub mod recommendation_banner;
pub mod sidebar;
pub mod top_bar;
