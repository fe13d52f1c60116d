//! Failed jobs: list on the left, the selected job's details on the right.

use crate::components::PagerBar;
use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use resqui_core::{FailedJob, backtrace_head, format_arguments, format_local, trim_error};
use resqui_state::{BulkAction, FailedJobController};

pub struct FailedView;

impl FailedView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        failed: &FailedJobController,
        selected: usize,
        title: Line<'static>,
        theme: &Theme,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        Self::render_list(frame, columns[0], failed, selected, title, theme);
        Self::render_detail(frame, columns[1], failed.jobs().get(selected), theme);
    }

    fn render_list(
        frame: &mut Frame,
        area: Rect,
        failed: &FailedJobController,
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
            failed.header(),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )];
        match failed.bulk_in_flight() {
            Some(BulkAction::ClearAll) => {
                header.push(Span::styled("  clearing...", Style::default().fg(theme.warning)))
            }
            Some(BulkAction::RetryAll) => {
                header.push(Span::styled("  retrying...", Style::default().fg(theme.warning)))
            }
            None if failed.is_loading() => {
                header.push(Span::styled("  loading...", Style::default().fg(theme.muted)))
            }
            None => {}
        }
        frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        let items: Vec<ListItem> = failed
            .jobs()
            .iter()
            .map(|job| {
                let mut spans = vec![Span::styled(
                    row_label(job),
                    Style::default().fg(theme.foreground),
                )];
                if let Some(id) = job.job_id() {
                    if failed.is_deleting(id) {
                        spans.push(Span::styled(" deleting...", Style::default().fg(theme.warning)));
                    }
                    if failed.is_retrying(id) {
                        spans.push(Span::styled(" retrying...", Style::default().fg(theme.warning)));
                    }
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme.muted)
                .add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default();
        if !failed.jobs().is_empty() {
            list_state.select(Some(selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        if let Some(pager) = PagerBar::line(
            failed.pager(),
            failed.total_failed(),
            failed.show_pager(),
            failed.is_loading(),
            theme,
        ) {
            frame.render_widget(Paragraph::new(pager), chunks[2]);
        }
    }

    fn render_detail(frame: &mut Frame, area: Rect, job: Option<&FailedJob>, theme: &Theme) {
        let block = Block::default().borders(Borders::ALL).title(" Details ");
        let Some(job) = job else {
            frame.render_widget(
                Paragraph::new(Span::styled("No failed job selected", Style::default().fg(theme.muted)))
                    .block(block),
                area,
            );
            return;
        };

        let label = |text: &str| Span::styled(format!("{:<11}", text), Style::default().fg(theme.muted));
        let mut lines = Vec::new();

        if let Some(payload) = job.payload.job() {
            lines.push(Line::from(vec![
                label("Class"),
                Span::styled(
                    payload.job_class.clone(),
                    Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![label("Job id"), Span::raw(payload.job_id.clone())]));
            lines.push(Line::from(vec![
                label("Arguments"),
                Span::raw(format_arguments(&payload.arguments)),
            ]));
            lines.push(Line::from(vec![
                label("Executions"),
                Span::raw(payload.executions.to_string()),
            ]));
        }
        lines.push(Line::from(vec![label("Queue"), Span::raw(job.queue.clone())]));
        lines.push(Line::from(vec![
            label("Failed at"),
            Span::raw(format_local(&job.failed_at)),
        ]));
        lines.push(Line::from(vec![
            label("Exception"),
            Span::styled(job.exception.clone(), Style::default().fg(theme.error)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            trim_error(&job.error),
            Style::default().fg(theme.error),
        )));

        let backtrace = backtrace_head(&job.backtrace);
        if !backtrace.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Backtrace",
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            for frame_line in backtrace {
                lines.push(Line::from(Span::styled(
                    format!("  {}", frame_line),
                    Style::default().fg(theme.muted),
                )));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

/// List label: job class and queue, or the error for entries without a job.
pub fn row_label(job: &FailedJob) -> String {
    match job.payload.job() {
        Some(payload) => format!("{} ({})", payload.job_class, job.queue),
        None => trim_error(&job.error),
    }
}

/// Text put on the clipboard for a failed job.
pub fn clipboard_text(job: &FailedJob) -> String {
    let mut text = trim_error(&job.error);
    for line in backtrace_head(&job.backtrace) {
        text.push('\n');
        text.push_str(line);
    }
    text
}
