//! Main TUI application.

use crate::command::{Command, Completion};
use crate::components::failed_view::clipboard_text;
use crate::components::{FailedView, Footer, Header, QueueView, ViewTabs, WorkerView};
use crate::ui::Theme;
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use resqui_state::{
    BulkAction, FailedJobController, JobAction, LOAD_FAILED_MESSAGE, QueueListController, Route,
    StatsStore, WorkerListController,
};
use std::time::{Duration, Instant};

/// How long a status message stays in the footer.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Destructive action waiting for a `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    ClearQueue(String),
    ClearFailed,
    RetryAll,
}

impl Confirm {
    pub fn prompt(&self) -> String {
        match self {
            Self::ClearQueue(queue) => format!("Clear every job in queue {}?", queue),
            Self::ClearFailed => "Delete all failed jobs?".to_string(),
            Self::RetryAll => "Retry all failed jobs?".to_string(),
        }
    }
}

/// Main application state.
///
/// The app never performs I/O itself. Key presses and completions queue
/// [`Command`]s, which the shell drains with [`App::drain_commands`] and
/// answers with [`App::handle_completion`].
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    base_url: String,
    route: Route,
    stats: StatsStore,
    queue: QueueListController,
    failed: FailedJobController,
    workers: WorkerListController,
    selected: usize,
    confirm: Option<Confirm>,
    status_message: Option<(String, Instant)>,
    outbox: Vec<Command>,
    refresh_interval: Option<Duration>,
    last_refresh: Instant,
}

impl App {
    /// Create the app and queue the initial stats load.
    pub fn new(base_url: impl Into<String>, theme: Theme, refresh_interval: Option<Duration>) -> Self {
        let mut app = Self {
            should_quit: false,
            show_help: false,
            theme,
            base_url: base_url.into(),
            route: Route::Root,
            stats: StatsStore::new(),
            queue: QueueListController::new(),
            failed: FailedJobController::new(),
            workers: WorkerListController::new(),
            selected: 0,
            confirm: None,
            status_message: None,
            outbox: Vec::new(),
            refresh_interval: refresh_interval.filter(|d| !d.is_zero()),
            last_refresh: Instant::now(),
        };
        let request = app.stats.begin_load();
        app.outbox.push(Command::LoadStats(request));
        app
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    pub fn queue(&self) -> &QueueListController {
        &self.queue
    }

    pub fn failed(&self) -> &FailedJobController {
        &self.failed
    }

    pub fn workers(&self) -> &WorkerListController {
        &self.workers
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn confirm(&self) -> Option<&Confirm> {
        self.confirm.as_ref()
    }

    /// Current status message, if it is still fresh.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().and_then(|(msg, timestamp)| {
            if timestamp.elapsed() < STATUS_TTL {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    /// Take every command queued since the last call.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Views are only usable once stats have loaded.
    fn views_available(&self) -> bool {
        self.stats.stats().is_some()
    }

    fn tabs(&self) -> Vec<Route> {
        Route::tabs(self.stats.display_queues())
    }

    /// Switch to `route` and fetch its data.
    pub fn navigate(&mut self, route: Route) {
        self.route = route;
        self.selected = 0;
        self.confirm = None;
        self.activate_current();
    }

    fn activate_current(&mut self) {
        if !self.views_available() {
            return;
        }
        let command = match &self.route {
            Route::Root => return,
            Route::Queue(name) => Command::LoadQueue(self.queue.activate(name)),
            Route::Failed => Command::LoadFailed(self.failed.fetch()),
            Route::Workers => Command::LoadWorkers(self.workers.load()),
        };
        self.outbox.push(command);
        self.last_refresh = Instant::now();
    }

    /// Reload stats and then the current view, starting from its first page.
    pub fn reload(&mut self) {
        self.queue.rewind();
        self.failed.rewind();
        let request = self.stats.begin_load();
        self.outbox.push(Command::LoadStats(request));
        self.confirm = None;
    }

    /// Re-fetch the visible listing when auto-refresh is due.
    pub fn tick(&mut self) {
        let Some(interval) = self.refresh_interval else {
            return;
        };
        if self.last_refresh.elapsed() < interval {
            return;
        }
        if self.has_pending_mutation() {
            self.last_refresh = Instant::now();
            return;
        }
        self.activate_current();
    }

    fn has_pending_mutation(&self) -> bool {
        self.queue.is_clearing() || self.failed.bulk_in_flight().is_some()
    }

    /// The shown queue is no longer listed, e.g. after it was cleared.
    fn queue_vanished(&self) -> bool {
        self.route
            .queue_name()
            .is_some_and(|name| !self.stats.queues().iter().any(|q| q == name))
    }

    fn row_count(&self) -> usize {
        match self.route {
            Route::Queue(_) => self.queue.jobs().len(),
            Route::Failed => self.failed.jobs().len(),
            Route::Workers => self.workers.workers().len(),
            Route::Root => 0,
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.row_count().saturating_sub(1));
    }

    /// Fold a finished request back into the views.
    pub fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Stats(request, result) => {
                if !self.stats.finish_load(request, result) {
                    return;
                }
                if let Some(route) = self.stats.take_navigation(&self.route) {
                    self.navigate(route);
                } else if self.queue_vanished() {
                    let route = self
                        .stats
                        .queues()
                        .first()
                        .map_or(Route::Failed, |q| Route::Queue(q.clone()));
                    self.navigate(route);
                } else {
                    self.activate_current();
                }
            }
            Completion::Queue(request, result) => {
                if self.queue.apply_page(&request, result) {
                    self.clamp_selection();
                }
            }
            Completion::QueueCleared(request, result) => {
                if self.queue.finish_clear(&request, result) {
                    self.set_status(format!("Cleared queue {}", request.queue));
                    self.reload();
                } else {
                    self.set_status(format!("Failed to clear queue {}", request.queue));
                }
            }
            Completion::Failed(request, result) => {
                if self.failed.apply_page(request, result) {
                    self.clamp_selection();
                }
            }
            Completion::FailedJob(request, result) => {
                let verb = request.action.verb();
                if self.failed.finish_job_action(&request, result) {
                    let done = match request.action {
                        JobAction::Delete => "Deleted",
                        JobAction::Retry => "Retried",
                    };
                    self.set_status(format!("{} job {}", done, request.job_id));
                    self.clamp_selection();
                } else {
                    self.set_status(format!("Failed to {} job {}", verb, request.job_id));
                }
            }
            Completion::FailedBulk(request, result) => match self.failed.finish_bulk(request, result) {
                Some(refetch) => {
                    self.outbox.push(Command::LoadFailed(refetch));
                    self.selected = 0;
                    self.set_status(match request.action {
                        BulkAction::ClearAll => "Cleared all failed jobs",
                        BulkAction::RetryAll => "Retrying all failed jobs",
                    });
                }
                None => self.set_status(format!("Failed to {}", request.action.verb())),
            },
            Completion::Workers(request, result) => {
                if self.workers.apply(request, result) {
                    self.clamp_selection();
                }
            }
            Completion::WorkerDeleted(request, result) => {
                if self.workers.finish_delete(&request, result) {
                    self.set_status(format!("Deleted worker {}", request.worker_id));
                    self.clamp_selection();
                } else {
                    self.set_status(format!("Failed to delete worker {}", request.worker_id));
                }
            }
        }
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Utc::now());
    }

    /// Handle a key event with an explicit clock for the staleness check.
    pub fn handle_key_at(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        if let Some(confirm) = self.confirm.take() {
            if key.code == KeyCode::Char('y') {
                self.run_confirmed(confirm);
            } else {
                self.set_status("Cancelled");
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('R') => {
                self.set_status("Reloading...");
                self.reload();
            }
            _ if !self.views_available() => {}
            KeyCode::Tab | KeyCode::Char('l') => self.cycle_tab(true),
            KeyCode::BackTab | KeyCode::Char('h') => self.cycle_tab(false),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.row_count().saturating_sub(1)
            }
            KeyCode::Char('n') | KeyCode::Right => self.page(true),
            KeyCode::Char('p') | KeyCode::Left => self.page(false),
            KeyCode::Char('d') => self.delete_selected(now),
            KeyCode::Char('r') => self.failed_job_action(JobAction::Retry),
            KeyCode::Char('c') => self.copy_selected_error(),
            KeyCode::Char('D') => self.ask_clear(),
            KeyCode::Char('A') if self.route == Route::Failed => {
                self.confirm = Some(Confirm::RetryAll)
            }
            _ => {}
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        let tabs = self.tabs();
        let len = tabs.len();
        let next = match tabs.iter().position(|t| *t == self.route) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        if let Some(route) = tabs.into_iter().nth(next) {
            self.navigate(route);
        }
    }

    fn select_next(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn page(&mut self, forward: bool) {
        let command = match self.route {
            Route::Queue(_) => {
                let request = if forward {
                    self.queue.next_page()
                } else {
                    self.queue.prev_page()
                };
                request.map(Command::LoadQueue)
            }
            Route::Failed => {
                let request = if forward {
                    self.failed.next_page()
                } else {
                    self.failed.prev_page()
                };
                request.map(Command::LoadFailed)
            }
            _ => None,
        };
        if let Some(command) = command {
            self.selected = 0;
            self.outbox.push(command);
        }
    }

    fn selected_failed_id(&mut self) -> Option<String> {
        let job = self.failed.jobs().get(self.selected)?;
        let id = job.job_id().map(str::to_string);
        if id.is_none() {
            self.set_status("Selected entry has no job id");
        }
        id
    }

    fn failed_job_action(&mut self, action: JobAction) {
        if self.route != Route::Failed {
            return;
        }
        let Some(id) = self.selected_failed_id() else {
            return;
        };
        match self.failed.begin_job_action(action, &id) {
            Some(request) => self.outbox.push(Command::FailedJob(request)),
            None => self.set_status(format!("Already trying to {} job {}", action.verb(), id)),
        }
    }

    fn delete_selected(&mut self, now: DateTime<Utc>) {
        match self.route {
            Route::Failed => self.failed_job_action(JobAction::Delete),
            Route::Workers => {
                let Some(worker) = self.workers.workers().get(self.selected) else {
                    return;
                };
                let id = worker.id.clone();
                if !worker.is_stale(now) {
                    let host = worker.host().to_string();
                    self.set_status(format!("Worker {} is alive", host));
                    return;
                }
                if let Some(request) = self.workers.begin_delete(&id, now) {
                    self.outbox.push(Command::DeleteWorker(request));
                }
            }
            _ => {}
        }
    }

    fn ask_clear(&mut self) {
        self.confirm = match &self.route {
            Route::Queue(name) => Some(Confirm::ClearQueue(name.clone())),
            Route::Failed => Some(Confirm::ClearFailed),
            _ => None,
        };
    }

    fn run_confirmed(&mut self, confirm: Confirm) {
        let command = match confirm {
            Confirm::ClearQueue(_) => self.queue.begin_clear().map(Command::ClearQueue),
            Confirm::ClearFailed => self
                .failed
                .begin_bulk(BulkAction::ClearAll)
                .map(Command::FailedBulk),
            Confirm::RetryAll => self
                .failed
                .begin_bulk(BulkAction::RetryAll)
                .map(Command::FailedBulk),
        };
        match command {
            Some(command) => self.outbox.push(command),
            None => self.set_status("Another action is still running"),
        }
    }

    /// Copy the selected failed job's error and backtrace to clipboard.
    fn copy_selected_error(&mut self) {
        if self.route != Route::Failed {
            return;
        }
        let Some(job) = self.failed.jobs().get(self.selected) else {
            self.set_status("No job selected");
            return;
        };
        let text = clipboard_text(job);

        let message = match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(text) {
                Ok(()) => "Error copied to clipboard",
                Err(e) => {
                    tracing::warn!("Clipboard write failed: {}", e);
                    "Failed to copy to clipboard"
                }
            },
            Err(_) => "Clipboard not available",
        };
        self.set_status(message);
    }

    /// Poll for events and handle them.
    pub fn poll_events(&mut self, timeout: Duration) -> std::io::Result<bool> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Render the UI.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Main content
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        Header::render(frame, chunks[0], &self.stats, &self.base_url, &self.theme);
        self.render_body(frame, chunks[1]);

        let prompt = self.confirm.as_ref().map(Confirm::prompt);
        Footer::render(
            frame,
            chunks[2],
            &self.route,
            prompt.as_deref(),
            self.status_message(),
            &self.theme,
        );

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        if self.stats.is_failed() {
            let message = Paragraph::new(Span::styled(
                LOAD_FAILED_MESSAGE,
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            ))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, area);
            return;
        }
        if self.stats.is_loading() && self.route == Route::Root {
            let message = Paragraph::new(Span::styled(
                "Loading...",
                Style::default().fg(self.theme.muted),
            ))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, area);
            return;
        }

        let title = ViewTabs::title_line(&self.tabs(), &self.route, &self.theme);
        match &self.route {
            Route::Queue(_) => {
                QueueView::render(frame, area, &self.queue, self.selected, title, &self.theme)
            }
            Route::Failed => {
                FailedView::render(frame, area, &self.failed, self.selected, title, &self.theme)
            }
            Route::Workers => WorkerView::render(
                frame,
                area,
                &self.workers,
                self.selected,
                Utc::now(),
                title,
                &self.theme,
            ),
            Route::Root => {
                frame.render_widget(Block::default().borders(Borders::ALL).title(title), area)
            }
        }
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let area = centered_rect(60, 70, frame.area());

        let help_text = r#"
  Keyboard Shortcuts
  ──────────────────

  Views
  Tab / l    Next tab
  S-Tab / h  Previous tab
  j/k / ↑↓   Select row
  g / G      First/last row
  n/p / →←   Next/previous page

  Failed jobs
  d          Delete selected job
  r          Retry selected job
  c          Copy error and backtrace
  D          Delete all failed jobs
  A          Retry all failed jobs

  Queues
  D          Clear queue

  Workers
  d          Delete selected stale worker

  Global
  R          Reload everything
  ?          This help
  q / Ctrl+C Quit

  Press any key to close
"#;

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Line::from(" Help ")),
            )
            .style(Style::default().fg(self.theme.foreground));

        frame.render_widget(paragraph, area);
    }
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use ratatui::{Terminal, backend::TestBackend};
    use resqui_api::ApiError;
    use resqui_core::{
        FailedJob, FailedPage, JobPayload, QueueEntry, QueuePage, Stats, Worker, WorkerState,
    };
    use resqui_state::{FailedRequest, QueueRequest, StatsRequest, WorkersRequest};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn stats(queues: &[&str]) -> Stats {
        Stats {
            success_count: 5,
            failure_count: 2,
            queues: queues.iter().map(|q| q.to_string()).collect(),
        }
    }

    fn payload(id: &str) -> QueueEntry {
        QueueEntry {
            class: Some("JobWrapper".into()),
            args: vec![JobPayload {
                job_class: "MailJob".into(),
                job_id: id.into(),
                executions: 0,
                arguments: vec![],
            }],
        }
    }

    fn failed_page(total: u64, ids: &[&str]) -> FailedPage {
        FailedPage {
            total_failed: total,
            jobs: ids
                .iter()
                .map(|id| FailedJob {
                    queue: "default".into(),
                    error: "boom".into(),
                    payload: payload(id),
                    ..FailedJob::default()
                })
                .collect(),
        }
    }

    fn stats_request(commands: &[Command]) -> StatsRequest {
        match commands {
            [Command::LoadStats(req), ..] => *req,
            other => panic!("expected stats load, got {other:?}"),
        }
    }

    fn only_queue_request(commands: Vec<Command>) -> QueueRequest {
        match commands.as_slice() {
            [Command::LoadQueue(req)] => req.clone(),
            other => panic!("expected queue load, got {other:?}"),
        }
    }

    fn only_failed_request(commands: Vec<Command>) -> FailedRequest {
        match commands.as_slice() {
            [Command::LoadFailed(req)] => *req,
            other => panic!("expected failed load, got {other:?}"),
        }
    }

    fn only_workers_request(commands: Vec<Command>) -> WorkersRequest {
        match commands.as_slice() {
            [Command::LoadWorkers(req)] => *req,
            other => panic!("expected workers load, got {other:?}"),
        }
    }

    /// App with stats loaded for `queues`; the follow-up commands are
    /// returned undrained.
    fn started(queues: &[&str]) -> (App, Vec<Command>) {
        let mut app = App::new("http://127.0.0.1:8080", Theme::dark(), None);
        let req = stats_request(&app.drain_commands());
        app.handle_completion(Completion::Stats(req, Ok(stats(queues))));
        let commands = app.drain_commands();
        (app, commands)
    }

    fn on_failed(total: u64, ids: &[&str]) -> App {
        let (mut app, commands) = started(&[]);
        let req = only_failed_request(commands);
        app.handle_completion(Completion::Failed(req, Ok(failed_page(total, ids))));
        app
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_startup_loads_stats() {
        let mut app = App::new("http://127.0.0.1:8080", Theme::dark(), None);
        let commands = app.drain_commands();
        assert_eq!(commands.len(), 1);
        stats_request(&commands);
        assert_eq!(app.route(), &Route::Root);
        assert!(app.drain_commands().is_empty());
    }

    #[test]
    fn test_navigates_to_first_queue() {
        let (app, commands) = started(&["default", "mail"]);
        assert_eq!(app.route(), &Route::Queue("default".into()));
        let req = only_queue_request(commands);
        assert_eq!(req.queue, "default");
        assert_eq!(req.first_job, 0);
    }

    #[test]
    fn test_no_queues_navigates_to_failed() {
        let (app, commands) = started(&[]);
        assert_eq!(app.route(), &Route::Failed);
        assert_eq!(only_failed_request(commands).from_job, 0);
    }

    #[test]
    fn test_stats_failure_shows_message() {
        let mut app = App::new("http://127.0.0.1:8080", Theme::dark(), None);
        let req = stats_request(&app.drain_commands());
        app.handle_completion(Completion::Stats(
            req,
            Err(ApiError::status(500, "/api/stats")),
        ));

        assert_eq!(app.route(), &Route::Failed);
        assert!(app.drain_commands().is_empty());
        assert!(screen(&app).contains(LOAD_FAILED_MESSAGE));

        // View keys do nothing until a reload succeeds.
        app.handle_key(code(KeyCode::Tab));
        assert_eq!(app.route(), &Route::Failed);

        app.handle_key(key('R'));
        let req = stats_request(&app.drain_commands());
        app.handle_completion(Completion::Stats(req, Ok(stats(&["default"]))));
        // Not at root any more, so the view stays and is fetched.
        assert_eq!(app.route(), &Route::Failed);
        only_failed_request(app.drain_commands());
    }

    #[test]
    fn test_tab_cycle() {
        let (mut app, _) = started(&["default", "mail"]);

        app.handle_key(code(KeyCode::Tab));
        assert_eq!(app.route(), &Route::Queue("mail".into()));
        assert_eq!(only_queue_request(app.drain_commands()).queue, "mail");

        app.handle_key(key('l'));
        assert_eq!(app.route(), &Route::Failed);
        only_failed_request(app.drain_commands());

        app.handle_key(code(KeyCode::Tab));
        assert_eq!(app.route(), &Route::Workers);
        only_workers_request(app.drain_commands());

        app.handle_key(code(KeyCode::Tab));
        assert_eq!(app.route(), &Route::Queue("default".into()));

        app.handle_key(code(KeyCode::BackTab));
        assert_eq!(app.route(), &Route::Workers);
    }

    #[test]
    fn test_queue_paging() {
        let (mut app, commands) = started(&["default"]);
        let req = only_queue_request(commands);
        app.handle_completion(Completion::Queue(
            req,
            Ok(QueuePage {
                total_jobs: 25,
                jobs: vec![Some(payload("a")); 10],
            }),
        ));

        app.handle_key(key('j'));
        app.handle_key(key('j'));
        assert_eq!(app.selected(), 2);

        app.handle_key(key('n'));
        assert_eq!(app.selected(), 0);
        assert_eq!(only_queue_request(app.drain_commands()).first_job, 10);

        app.handle_key(code(KeyCode::Left));
        assert_eq!(only_queue_request(app.drain_commands()).first_job, 0);

        app.handle_key(key('p'));
        assert!(app.drain_commands().is_empty());
    }

    #[test]
    fn test_delete_failed_job() {
        let mut app = on_failed(12, &["a", "b", "c"]);
        app.handle_key(key('j'));
        app.handle_key(key('d'));

        let request = match app.drain_commands().as_slice() {
            [Command::FailedJob(req)] => req.clone(),
            other => panic!("expected delete, got {other:?}"),
        };
        assert_eq!(request.action, JobAction::Delete);
        assert_eq!(request.job_id, "b");

        // Second press while pending is ignored.
        app.handle_key(key('d'));
        assert!(app.drain_commands().is_empty());

        app.handle_completion(Completion::FailedJob(request, Ok(())));
        assert_eq!(app.failed().total_failed(), 11);
        assert_eq!(app.failed().jobs().len(), 2);
        assert_eq!(app.status_message(), Some("Deleted job b"));
        assert!(app.drain_commands().is_empty());
    }

    #[test]
    fn test_retry_failure_keeps_job() {
        let mut app = on_failed(1, &["a"]);
        app.handle_key(key('r'));
        let request = match app.drain_commands().as_slice() {
            [Command::FailedJob(req)] => req.clone(),
            other => panic!("expected retry, got {other:?}"),
        };
        assert_eq!(request.action, JobAction::Retry);

        app.handle_completion(Completion::FailedJob(
            request,
            Err(ApiError::status(500, "/api/retry_job")),
        ));
        assert_eq!(app.failed().jobs().len(), 1);
        assert_eq!(app.status_message(), Some("Failed to retry job a"));
    }

    #[test]
    fn test_bulk_actions_need_confirmation() {
        let mut app = on_failed(3, &["a", "b", "c"]);

        app.handle_key(key('D'));
        assert_eq!(app.confirm(), Some(&Confirm::ClearFailed));
        app.handle_key(key('n'));
        assert!(app.confirm().is_none());
        assert!(app.drain_commands().is_empty());

        app.handle_key(key('A'));
        app.handle_key(key('y'));
        let request = match app.drain_commands().as_slice() {
            [Command::FailedBulk(req)] => *req,
            other => panic!("expected bulk action, got {other:?}"),
        };
        assert_eq!(request.action, BulkAction::RetryAll);

        app.handle_completion(Completion::FailedBulk(request, Ok(())));
        assert_eq!(only_failed_request(app.drain_commands()).from_job, 0);
    }

    #[test]
    fn test_clear_queue_reloads_everything() {
        let (mut app, commands) = started(&["default"]);
        let mut req = only_queue_request(commands);
        for _ in 0..2 {
            app.handle_completion(Completion::Queue(
                req,
                Ok(QueuePage {
                    total_jobs: 35,
                    jobs: vec![Some(payload("a")); 10],
                }),
            ));
            app.handle_key(key('n'));
            req = only_queue_request(app.drain_commands());
        }
        assert_eq!(req.first_job, 20);
        app.handle_completion(Completion::Queue(
            req,
            Ok(QueuePage {
                total_jobs: 35,
                jobs: vec![Some(payload("a")); 5],
            }),
        ));

        app.handle_key(key('D'));
        app.handle_key(key('y'));
        let request = match app.drain_commands().as_slice() {
            [Command::ClearQueue(req)] => req.clone(),
            other => panic!("expected clear, got {other:?}"),
        };
        assert_eq!(request.queue, "default");

        app.handle_completion(Completion::QueueCleared(request, Ok(())));
        assert_eq!(app.queue().total_jobs(), 0);
        assert!(app.queue().jobs().is_empty());
        assert_eq!(app.queue().pager().offset(), 0);
        assert!(screen(&app).contains("default: 0 jobs"));

        let req = stats_request(&app.drain_commands());
        app.handle_completion(Completion::Stats(req, Ok(stats(&["default"]))));
        assert_eq!(app.route(), &Route::Queue("default".into()));
        let req = only_queue_request(app.drain_commands());
        assert_eq!(req.queue, "default");
        assert_eq!(req.first_job, 0);
    }

    #[test]
    fn test_reload_starts_failed_at_first_page() {
        let mut app = on_failed(35, &["a"]);
        app.handle_key(key('n'));
        let req = only_failed_request(app.drain_commands());
        assert_eq!(req.from_job, 10);
        app.handle_completion(Completion::Failed(req, Ok(failed_page(35, &["k"]))));

        app.handle_key(key('R'));
        let req = stats_request(&app.drain_commands());
        app.handle_completion(Completion::Stats(req, Ok(stats(&[]))));
        assert_eq!(app.route(), &Route::Failed);
        assert_eq!(only_failed_request(app.drain_commands()).from_job, 0);
    }

    #[test]
    fn test_reload_keeps_tabs_while_loading() {
        let (mut app, commands) = started(&["default", "mail"]);
        only_queue_request(commands);
        assert!(screen(&app).contains("[default] mail Failed Workers"));

        app.handle_key(key('R'));
        let req = stats_request(&app.drain_commands());
        assert!(screen(&app).contains("[default] mail Failed Workers"));

        app.handle_completion(Completion::Stats(req, Ok(stats(&["default"]))));
        assert!(screen(&app).contains("[default] Failed Workers"));
    }

    #[test]
    fn test_worker_delete_gated_by_heartbeat() {
        let (mut app, _) = started(&["default"]);
        app.handle_key(code(KeyCode::BackTab));
        assert_eq!(app.route(), &Route::Workers);
        let req = only_workers_request(app.drain_commands());

        let now = Utc::now();
        let worker = |id: &str, minutes: i64| Worker {
            id: id.into(),
            heartbeat: Some((now - TimeDelta::minutes(minutes)).to_rfc3339()),
            state: WorkerState::Idle,
        };
        app.handle_completion(Completion::Workers(
            req,
            Ok(vec![worker("fresh:1", 29), worker("old:2", 31)]),
        ));

        app.handle_key_at(key('d'), now);
        assert!(app.drain_commands().is_empty());
        assert_eq!(app.status_message(), Some("Worker fresh is alive"));

        app.handle_key_at(key('j'), now);
        app.handle_key_at(key('d'), now);
        let request = match app.drain_commands().as_slice() {
            [Command::DeleteWorker(req)] => req.clone(),
            other => panic!("expected worker delete, got {other:?}"),
        };
        assert_eq!(request.worker_id, "old:2");

        app.handle_completion(Completion::WorkerDeleted(request, Ok(())));
        assert_eq!(app.workers().workers().len(), 1);
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn test_stale_completion_ignored() {
        let (mut app, commands) = started(&["default", "mail"]);
        let old = only_queue_request(commands);
        app.handle_key(code(KeyCode::Tab));
        only_queue_request(app.drain_commands());

        app.handle_completion(Completion::Queue(
            old,
            Ok(QueuePage {
                total_jobs: 4,
                jobs: vec![None; 4],
            }),
        ));
        assert!(app.queue().jobs().is_empty());
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let (mut app, _) = started(&["default"]);
        app.handle_key(key('?'));
        assert!(app.show_help);
        assert!(screen(&app).contains("Keyboard Shortcuts"));

        app.handle_key(key('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(key('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_failed_view() {
        let app = on_failed(2, &["a", "b"]);
        let text = screen(&app);
        assert!(text.contains("2 jobs failed"));
        assert!(text.contains("Total Failed"));
        assert!(text.contains("[Failed]"));
    }
}
