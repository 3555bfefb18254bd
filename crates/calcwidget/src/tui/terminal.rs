//! Terminal event loop

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, info};

use super::app::CalculatorApp;
use super::ui::render;

/// Redraw interval while idle, so notifications expire on screen
pub const TICK: Duration = Duration::from_millis(100);

/// Runs `app` in the alternate screen until it quits
///
/// The terminal is restored even when the loop fails.
pub fn run(app: &mut CalculatorApp) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    info!("terminal session started");

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("terminal session ended");
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> io::Result<()> {
    let started = Instant::now();
    let now_ms = || u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    while !app.should_quit() {
        let now = now_ms();
        app.tick(now);
        terminal.draw(|frame| render(app, frame, now))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug!(?key.code, "key");
                    app.handle_key_event(key, now_ms());
                }
                _ => {}
            }
        }
    }
    Ok(())
}
