mod dispatch;
mod event_loop;
mod input;
mod render;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self as term_event, Event as TermEvent},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use tokio::runtime::Handle;
use tracing::info;

use crate::config::Config;
use crate::console::{Console, Event, ResultEvent};
use crate::error::ConsoleError;
use crate::gateway::RuntimeGateway;

pub use dispatch::Dispatcher;
pub use input::translate;

/// How long to wait for terminal input before checking results and ticks.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Terminal session state around the console.
pub struct App {
    pub console: Console,
    pub dispatcher: Dispatcher,
    pub results: Receiver<ResultEvent>,
    pub stats_interval: Option<Duration>,
    pub last_tick: Instant,
    pub clear_pending: bool,
}

impl App {
    pub fn new(
        console: Console,
        gateway: Arc<dyn RuntimeGateway>,
        handle: Handle,
        stats_interval: Option<Duration>,
    ) -> Self {
        let (dispatcher, results) = Dispatcher::new(gateway, handle);
        Self {
            console,
            dispatcher,
            results,
            stats_interval,
            last_tick: Instant::now(),
            clear_pending: true,
        }
    }
}

/// Run the console full-screen until the operator quits or `should_quit` is
/// raised. The terminal is restored on every exit path.
pub fn run(
    config: &Config,
    gateway: Arc<dyn RuntimeGateway>,
    handle: Handle,
    should_quit: Arc<AtomicBool>,
) -> Result<(), ConsoleError> {
    enable_raw_mode()?;
    let result = execute!(io::stdout(), EnterAlternateScreen, Clear(ClearType::All))
        .map_err(ConsoleError::from)
        .and_then(|_| event_loop(config, gateway, handle, &should_quit));
    restore_terminal();
    result
}

fn event_loop(
    config: &Config,
    gateway: Arc<dyn RuntimeGateway>,
    handle: Handle,
    should_quit: &AtomicBool,
) -> Result<(), ConsoleError> {
    let (cols, rows) = terminal::size()?;
    let mut app = App::new(Console::new(cols, rows), gateway, handle, config.stats_interval);
    let init = app.console.init();
    app.dispatcher.dispatch_all(init);
    info!(cols, rows, "console started");

    let mut needs_render = true;
    loop {
        if should_quit.load(Ordering::Relaxed) {
            info!("termination signal received");
            break;
        }

        if app.poll_results() {
            needs_render = true;
        }
        if app.process_tick() {
            needs_render = true;
        }

        if needs_render {
            render::render(&mut app)?;
            needs_render = false;
        }

        if term_event::poll(INPUT_POLL)? {
            match term_event::read()? {
                TermEvent::Key(key_event) => {
                    if let Some(key) = translate(key_event) {
                        app.handle(Event::Key(key));
                        needs_render = true;
                    }
                }
                TermEvent::Resize(width, height) => {
                    app.handle(Event::Resize { width, height });
                    app.clear_pending = true;
                    needs_render = true;
                }
                _ => {}
            }
        }

        if app.console.should_quit() {
            break;
        }
    }

    info!("console stopped");
    Ok(())
}
