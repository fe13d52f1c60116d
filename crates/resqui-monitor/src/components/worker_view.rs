//! Active workers.

use crate::ui::Theme;
use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use resqui_state::{WorkerListController, worker_detail, worker_title};

pub struct WorkerView;

impl WorkerView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        workers: &WorkerListController,
        selected: usize,
        now: DateTime<Utc>,
        title: Line<'static>,
        theme: &Theme,
    ) {
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        let mut header = vec![Span::styled(
            workers.summary(),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )];
        if workers.is_loading() {
            header.push(Span::styled("  loading...", Style::default().fg(theme.muted)));
        }
        frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        let items: Vec<ListItem> = workers
            .workers()
            .iter()
            .map(|worker| {
                let (symbol, symbol_style) = if worker.is_working() {
                    ("●", Style::default().fg(theme.warning))
                } else {
                    ("○", Style::default().fg(theme.success))
                };

                let mut title = vec![
                    Span::styled(format!("{} ", symbol), symbol_style),
                    Span::styled(
                        worker_title(worker),
                        Style::default()
                            .fg(theme.foreground)
                            .add_modifier(Modifier::BOLD),
                    ),
                ];
                if workers.is_deleting(&worker.id) {
                    title.push(Span::styled("  deleting...", Style::default().fg(theme.warning)));
                } else if worker.is_stale(now) {
                    title.push(Span::styled("  ✗ stale", Style::default().fg(theme.error)));
                }

                ListItem::new(vec![
                    Line::from(title),
                    Line::from(Span::styled(
                        format!("  {}", worker_detail(worker)),
                        Style::default().fg(theme.muted),
                    )),
                ])
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme.muted)
                .add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default();
        if !workers.workers().is_empty() {
            list_state.select(Some(selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }
}
