//! Command-line arguments

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::input::DEFAULT_SEQUENCE_TIMEOUT;
use crate::mpd::ServerConfig;

/// pms-rs - a keyboard driven MPD client
#[derive(Parser, Debug, Clone)]
#[command(name = "pms-rs")]
#[command(version)]
#[command(about = "Keyboard driven terminal client for MPD", long_about = None)]
pub struct CliArgs {
    /// MPD host. `password@host` is accepted as well
    #[arg(long, env = "MPD_HOST", default_value = "localhost")]
    pub host: String,

    /// MPD port
    #[arg(short, long, env = "MPD_PORT", default_value_t = 6600)]
    pub port: u16,

    /// MPD password
    #[arg(long, env = "MPD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Configuration script, run after the built-in defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Milliseconds to wait for the rest of an ambiguous key sequence
    #[arg(long, default_value_t = DEFAULT_SEQUENCE_TIMEOUT.as_millis() as u64)]
    pub key_timeout: u64,
}

impl CliArgs {
    pub fn server(&self) -> ServerConfig {
        let (password, host) = match self.host.rsplit_once('@') {
            Some((password, host)) => (Some(password.to_string()), host.to_string()),
            None => (None, self.host.clone()),
        };
        ServerConfig {
            host,
            port: self.port,
            password: self.password.clone().or(password),
        }
    }

    /// Explicit `--config`, else `pms-rs/pms.conf` in the user config dir.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("pms-rs").join("pms.conf")))
    }

    pub fn key_timeout(&self) -> Duration {
        Duration::from_millis(self.key_timeout)
    }
}
