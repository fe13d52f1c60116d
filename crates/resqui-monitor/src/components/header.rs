//! Header with the aggregate counters.

use crate::ui::Theme;
use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use resqui_state::{StatsState, StatsStore};

pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, stats: &StatsStore, base_url: &str, theme: &Theme) {
        let datetime = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let title = Line::from(vec![
            Span::styled("resqui", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" │ ", Style::default().fg(theme.muted)),
            Span::styled(base_url.to_string(), Style::default().fg(theme.highlight)),
        ]);
        let datetime_line = Line::from(Span::styled(datetime, Style::default().fg(theme.warning)))
            .alignment(Alignment::Right);

        let (failed, succeeded) = match stats.state() {
            StatsState::Loaded(s) => (s.failure_count.to_string(), s.success_count.to_string()),
            StatsState::Loading => ("…".to_string(), "…".to_string()),
            StatsState::Failed => ("-".to_string(), "-".to_string()),
        };

        let counters = Line::from(vec![
            Span::styled("Total Failed: ", Style::default().fg(theme.muted)),
            Span::styled(
                failed,
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Total Succeeded: ", Style::default().fg(theme.muted)),
            Span::styled(
                succeeded,
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let paragraph = Paragraph::new(counters).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_top(datetime_line),
        );
        frame.render_widget(paragraph, area);
    }
}
