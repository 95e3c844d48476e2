pub mod profile;
pub mod theme;

pub use profile::{SignInError, StudentSession};
pub use theme::{Theme, ThemePreference};
