//! Terminal UI for resqui.

pub mod app;
pub mod command;
pub mod components;
pub mod ui;

pub use app::App;
pub use command::{Command, Completion};
pub use ui::Theme;
