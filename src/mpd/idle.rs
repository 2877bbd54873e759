//! Background watcher for MPD's `idle` notifications
//!
//! Runs on its own connection so the blocking client stays free for
//! commands. Changes are published on an unbounded channel that the event
//! loop drains between frames.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::protocol::{ack_message, quote};
use super::ServerConfig;

const SUBSYSTEMS: &str = "idle player mixer options playlist database update";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MpdEvent {
    /// Player state, volume or playback options changed
    Player,
    /// The queue changed
    Queue,
    /// The database changed
    Library,
    /// The watcher lost its connection
    Disconnected(String),
}

impl MpdEvent {
    fn from_subsystem(name: &str) -> Option<Self> {
        match name {
            "player" | "mixer" | "options" => Some(MpdEvent::Player),
            "playlist" => Some(MpdEvent::Queue),
            "database" | "update" => Some(MpdEvent::Library),
            _ => None,
        }
    }
}

/// Start watching. The task ends after sending `Disconnected`, or when the
/// receiving side is gone.
pub fn spawn_watcher(config: ServerConfig, events: UnboundedSender<MpdEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let reason = match watch(&config, &events).await {
            Ok(()) => return,
            Err(e) => e.to_string(),
        };
        tracing::warn!(error = %reason, "MPD idle watcher stopped");
        let _ = events.send(MpdEvent::Disconnected(reason));
    })
}

async fn watch(config: &ServerConfig, events: &UnboundedSender<MpdEvent>) -> std::io::Result<()> {
    let stream = TcpStream::connect(config.address()).await?;
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    let greeting = next_line(&mut lines).await?;
    if !greeting.starts_with("OK MPD ") {
        return Err(protocol_error(format!("not an MPD server: {greeting}")));
    }
    if let Some(password) = &config.password {
        write_half
            .write_all(format!("password {}\n", quote(password)).as_bytes())
            .await?;
        let reply = next_line(&mut lines).await?;
        if reply != "OK" {
            return Err(protocol_error(ack_message(&reply)));
        }
    }
    tracing::debug!("MPD idle watcher connected");

    loop {
        write_half.write_all(format!("{SUBSYSTEMS}\n").as_bytes()).await?;
        loop {
            let line = next_line(&mut lines).await?;
            if line == "OK" {
                break;
            }
            if line.starts_with("ACK ") {
                return Err(protocol_error(ack_message(&line)));
            }
            let Some(event) = line
                .strip_prefix("changed: ")
                .and_then(MpdEvent::from_subsystem)
            else {
                continue;
            };
            tracing::trace!(?event, "MPD change");
            if events.send(event).is_err() {
                return Ok(());
            }
        }
    }
}

async fn next_line(
    lines: &mut tokio::io::Lines<BufReader<tokio::net::tcp::OwnedReadHalf>>,
) -> std::io::Result<String> {
    lines.next_line().await?.ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection closed")
    })
}

fn protocol_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, message)
}
