use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use tracing::warn;

use crate::console::Event;

use super::App;

impl App {
    /// Feed an event to the console and dispatch whatever it asks for.
    pub fn handle(&mut self, event: Event) {
        let pending = self.console.update(event);
        self.dispatcher.dispatch_all(pending);
    }

    /// Drain finished operations. Returns true if any arrived.
    pub fn poll_results(&mut self) -> bool {
        let mut received = false;
        loop {
            match self.results.try_recv() {
                Ok(result) => {
                    self.handle(Event::Completed(result));
                    received = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("result channel closed");
                    break;
                }
            }
        }
        received
    }

    /// Send a stats tick when the interval has elapsed.
    pub fn process_tick(&mut self) -> bool {
        let Some(interval) = self.stats_interval else { return false };
        let now = Instant::now();
        if now.duration_since(self.last_tick) < interval {
            return false;
        }
        self.last_tick = now;
        self.handle(Event::Tick);
        true
    }
}
