//! Pending jobs of the selected queue.

use crate::components::PagerBar;
use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use resqui_core::{QueueEntry, format_arguments};
use resqui_state::QueueListController;

pub struct QueueView;

impl QueueView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        queue: &QueueListController,
        selected: usize,
        title: Line<'static>,
        theme: &Theme,
    ) {
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut header = vec![Span::styled(
            queue.header().unwrap_or_default(),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )];
        if queue.is_clearing() {
            header.push(Span::styled("  clearing...", Style::default().fg(theme.warning)));
        } else if queue.is_loading() {
            header.push(Span::styled("  loading...", Style::default().fg(theme.muted)));
        }
        frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        let items: Vec<ListItem> = queue
            .jobs()
            .iter()
            .map(|entry| Self::row(entry.as_ref(), theme))
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme.muted)
                .add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default();
        if !queue.jobs().is_empty() {
            list_state.select(Some(selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        if let Some(pager) = PagerBar::line(
            queue.pager(),
            queue.total_jobs(),
            queue.show_pager(),
            false,
            theme,
        ) {
            frame.render_widget(Paragraph::new(pager), chunks[2]);
        }
    }

    fn row(entry: Option<&QueueEntry>, theme: &Theme) -> ListItem<'static> {
        let (class, args) = row_text(entry);
        ListItem::new(Line::from(vec![
            Span::styled(class, Style::default().fg(theme.highlight)),
            Span::raw("  "),
            Span::styled(args, Style::default().fg(theme.foreground)),
        ]))
    }
}

/// Job class and rendered arguments for one queue line.
pub fn row_text(entry: Option<&QueueEntry>) -> (String, String) {
    match entry.and_then(QueueEntry::job) {
        Some(job) => (job.job_class.clone(), format_arguments(&job.arguments)),
        None => ("<unreadable job>".to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resqui_core::{JobArgument, JobPayload};

    #[test]
    fn test_row_text() {
        let entry = QueueEntry {
            class: Some("JobWrapper".into()),
            args: vec![JobPayload {
                job_class: "MailJob".into(),
                job_id: "j".into(),
                executions: 0,
                arguments: vec![JobArgument::from("hi"), JobArgument::Null],
            }],
        };
        assert_eq!(
            row_text(Some(&entry)),
            ("MailJob".to_string(), "hi, null".to_string())
        );
    }

    #[test]
    fn test_unreadable_rows() {
        assert_eq!(row_text(None).0, "<unreadable job>");
        assert_eq!(row_text(Some(&QueueEntry::default())).0, "<unreadable job>");
    }
}
