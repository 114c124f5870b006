//! Terminal setup and the async event loop.

use crate::backend::Backend as DataBackend;
use crate::config::Config;
use crate::logger::Logger;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{Component, EventHandler};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;

/// Run the dashboard until the user quits
pub async fn run_app(config: Config, backend: Arc<dyn DataBackend>, logger: Logger) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if config.ui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Initialize application components
    let mut app = AppComponent::new(backend, &config, logger);
    let mut event_handler = EventHandler::new();
    app.start();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.render(f, f.area()))?;

        let event = event_handler.next_event().await?;
        app.handle_event(event)?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

