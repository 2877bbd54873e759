//! MPD module - Talking to the Music Player Daemon
//!
//! - `protocol`: Request quoting and response parsing
//! - `client`: Blocking client implementing the playback service
//! - `idle`: Async watcher publishing change notifications

mod client;
mod idle;
mod protocol;

pub use client::MpdClient;
pub use idle::{spawn_watcher, MpdEvent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
