//! resqui - terminal dashboard for Resque.

mod dispatch;
mod logging;

use crate::dispatch::Dispatcher;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use miette::{IntoDiagnostic, Result};
use ratatui::prelude::*;
use resqui_api::ResqueClient;
use resqui_cli::Args;
use resqui_monitor::{App, Completion, Theme};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let client = ResqueClient::new(&args.client_config()).into_diagnostic()?;
    tracing::info!("Starting resqui against {}", client.base_url());

    let (tx, mut rx) = mpsc::channel(256);
    let dispatcher = Dispatcher::new(client, tx);
    let mut app = App::new(
        args.base_url.clone(),
        Theme::from_name(&args.theme),
        args.refresh_interval(),
    );

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    let res = run_app(&mut terminal, &mut app, &dispatcher, &mut rx);

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    if let Err(err) = &res {
        tracing::error!("UI loop failed: {}", err);
    }
    res.into_diagnostic()
}

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    rx: &mut mpsc::Receiver<Completion>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        for command in app.drain_commands() {
            dispatcher.dispatch(command);
        }

        terminal.draw(|frame| app.render(frame))?;

        app.poll_events(tick_rate)?;
        while let Ok(completion) = rx.try_recv() {
            app.handle_completion(completion);
        }
        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
