//! Footer component with keyboard shortcuts and status messages.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use resqui_state::Route;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Footer {
    /// A pending confirmation prompt takes precedence over the status
    /// message, which takes precedence over the key hints.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        route: &Route,
        prompt: Option<&str>,
        status_message: Option<&str>,
        theme: &Theme,
    ) {
        let version = format!("v{}", VERSION);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(version.len() as u16 + 1),
            ])
            .split(area);

        let left_content = if let Some(prompt) = prompt {
            Line::from(Span::styled(
                format!("{} [y/N]", prompt),
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ))
        } else if let Some(msg) = status_message {
            Line::from(Span::styled(
                msg.to_string(),
                Style::default()
                    .fg(theme.status)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(Self::hints(route), Style::default().fg(theme.muted)))
        };

        frame.render_widget(Paragraph::new(left_content), chunks[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(version, Style::default().fg(theme.muted)))),
            chunks[1],
        );
    }

    pub fn hints(route: &Route) -> &'static str {
        match route {
            Route::Queue(_) => "tab:view  j/k:nav  n/p:page  D:clear  R:reload  ?:help  q:quit",
            Route::Failed => {
                "tab:view  j/k:nav  n/p:page  d:delete  r:retry  c:copy  D:clear  A:retry all  ?:help  q:quit"
            }
            Route::Workers => "tab:view  j/k:nav  d:delete stale  R:reload  ?:help  q:quit",
            Route::Root => "R:reload  ?:help  q:quit",
        }
    }
}
