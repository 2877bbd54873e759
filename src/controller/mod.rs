//! Controller module - Event handling and the MPD connection
//!
//! This module contains the application controller that routes user input
//! into the command language and keeps the model in sync with MPD.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling per input mode
//! - `events`: MPD change notifications and state refreshes

mod events;
mod input;

use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::input::{Dispatcher, KeyResolver};
use crate::model::AppModel;
use crate::mpd::{spawn_watcher, MpdClient, MpdEvent, ServerConfig};

const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);
const STATUS_INTERVAL: Duration = Duration::from_secs(1);

pub struct AppController {
    pub(crate) model: AppModel,
    dispatcher: Dispatcher,
    resolver: KeyResolver,
    server: ServerConfig,
    events: UnboundedSender<MpdEvent>,
    watcher: Option<JoinHandle<()>>,
    last_connect_attempt: Option<Instant>,
    last_status: Instant,
}

impl AppController {
    pub fn new(
        model: AppModel,
        dispatcher: Dispatcher,
        key_timeout: Duration,
        server: ServerConfig,
        events: UnboundedSender<MpdEvent>,
    ) -> Self {
        let resolver = KeyResolver::new(model.bindings.clone(), key_timeout);
        Self {
            model,
            dispatcher,
            resolver,
            server,
            events,
            watcher: None,
            last_connect_attempt: None,
            last_status: Instant::now(),
        }
    }

    /// Run one command line, reporting failure in the multibar.
    pub fn run_line(&mut self, line: &str) {
        if let Err(e) = self.dispatcher.dispatch(line) {
            tracing::warn!(line, error = %e, "Command failed");
            self.model.ui.borrow_mut().set_error(e.to_string());
        }
    }

    /// Open the command connection and the idle watcher, then load
    /// everything shown on screen.
    pub fn connect(&mut self) {
        self.last_connect_attempt = Some(Instant::now());
        let client = match MpdClient::connect(&self.server) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(address = %self.server.address(), error = %e, "Cannot connect to MPD");
                self.model
                    .ui
                    .borrow_mut()
                    .set_error(format!("Cannot connect to MPD at {}: {e}", self.server.address()));
                return;
            }
        };

        let version = client.version().to_string();
        self.model.player.connect(Box::new(client));
        if let Some(old) = self.watcher.replace(spawn_watcher(self.server.clone(), self.events.clone())) {
            old.abort();
        }
        self.model
            .ui
            .borrow_mut()
            .set_info(format!("Connected to MPD {version} at {}", self.server.address()));

        self.refresh_status();
        self.refresh_queue();
        self.refresh_library();
    }

    /// Periodic work: key sequence timeouts, reconnects and the elapsed
    /// time readout.
    pub fn tick(&mut self, now: Instant) {
        self.expire_keys(now);

        if !self.model.player.is_connected() {
            let due = self
                .last_connect_attempt
                .is_none_or(|at| now.duration_since(at) >= RECONNECT_INTERVAL);
            if due {
                self.connect();
            }
            return;
        }

        if now.duration_since(self.last_status) >= STATUS_INTERVAL {
            self.last_status = now;
            self.refresh_status();
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
        self.model.player.disconnect();
        tracing::info!("Controller shut down");
    }
}
