//! Terminal UI for soprum that lists a user's properties with their annual
//! waste costs and compares each property against its peers.

mod app;
mod config;
mod input;
mod logging;
mod ui;

use std::{io, mem, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use soprum_core::{backend::Backend, service::SoprumService};
use soprum_provider_http as http;
use soprum_store_memory::{self as memory, MemoryStore};
use tracing::{error, info};

use crate::app::App;
use crate::config::SourceConfig;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config.log_file)?;
    info!(username = %config.username, source = ?config.source, "starting soprum");

    // Backend + service setup
    let backend = open_backend(&config.source)?;
    let service = Arc::new(SoprumService::new(&backend));

    // App state
    let app = App::new(service, config.username);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn open_backend(source: &SourceConfig) -> Result<Backend> {
    match source {
        SourceConfig::File { path } => {
            let store = MemoryStore::from_path(path)
                .with_context(|| format!("failed to load dataset {}", path.display()))?;
            Ok(memory::backend(store))
        }
        SourceConfig::Http {
            base_url,
            timeout_seconds,
        } => {
            let mut builder = Client::builder().user_agent("soprum/0.1");
            if let Some(seconds) = timeout_seconds {
                builder = builder.timeout(StdDuration::from_secs(*seconds));
            }
            Ok(http::backend(builder.build()?, base_url.as_str()))
        }
    }
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let mut pending = Action::ReloadCosts;

    loop {
        let action = if pending == Action::None {
            // Draw current UI
            terminal.draw(|frame| ui::draw(frame, &app))?;

            // Poll for input (non-blocking, small timeout to keep CPU low)
            if event::poll(StdDuration::from_millis(100))?
                && let CEvent::Key(key) = event::read()?
            {
                input::handle_key_event(key, &mut app)
            } else {
                Action::None
            }
        } else {
            mem::replace(&mut pending, Action::None)
        };

        match action {
            Action::Quit => break,
            Action::None => {}
            Action::ReloadCosts => {
                app.is_loading = true;
                app.error_message = None;
                terminal.draw(|frame| ui::draw(frame, &app))?;

                let res = app.service.all_costs_for_user(&app.username).await;

                app.is_loading = false;
                match res {
                    Ok(costs) => app.set_costs(costs),
                    Err(err) => {
                        error!(%err, "loading costs failed");
                        app.set_costs(Vec::new());
                        app.error_message = Some(format!("Could not load costs: {err}"));
                    }
                }
            }
            Action::OpenComparison => {
                let Some(id) = app.selected_cost().map(|report| report.property_id) else {
                    app.error_message = Some("No property selected".into());
                    continue;
                };

                app.is_loading = true;
                app.error_message = None;
                terminal.draw(|frame| ui::draw(frame, &app))?;

                let res = app.service.comparison(id).await;

                app.is_loading = false;
                match res {
                    Ok(report) => app.open_comparison(report),
                    Err(err) => {
                        error!(property = %id, %err, "comparison failed");
                        app.error_message = Some(format!("Comparison failed: {err}"));
                    }
                }
            }
        }
    }

    Ok(())
}
