//! Blocking MPD client
//!
//! Every request writes one command line and reads the full response before
//! returning, so a call is a single round trip on the UI thread.

use std::io::{BufReader, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::model::{PlaybackError, PlaybackService, PlayerStatus, SeekTarget, Song, SongId};

use super::protocol::{self, Pairs};
use super::ServerConfig;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MpdClient {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    version: String,
}

impl MpdClient {
    pub fn connect(config: &ServerConfig) -> Result<Self, PlaybackError> {
        let stream = TcpStream::connect(config.address())?;
        stream.set_read_timeout(Some(IO_TIMEOUT))?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;

        let mut reader = BufReader::new(stream.try_clone()?);
        let version = protocol::read_greeting(&mut reader)?;
        let mut client = MpdClient {
            stream,
            reader,
            version,
        };
        if let Some(password) = &config.password {
            client.command(&format!("password {}", protocol::quote(password)))?;
        }
        tracing::info!(address = %config.address(), version = %client.version, "Connected to MPD");
        Ok(client)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn command(&mut self, line: &str) -> Result<Pairs, PlaybackError> {
        tracing::trace!(command = line, "MPD request");
        self.stream.write_all(line.as_bytes())?;
        self.stream.write_all(b"\n")?;
        self.stream.flush()?;
        let result = protocol::read_response(&mut self.reader);
        if let Err(e) = &result {
            tracing::debug!(command = line, error = %e, "MPD request failed");
        }
        result
    }

    fn simple(&mut self, line: &str) -> Result<(), PlaybackError> {
        self.command(line).map(|_| ())
    }
}

impl PlaybackService for MpdClient {
    fn play(&mut self, position: Option<usize>) -> Result<(), PlaybackError> {
        match position {
            Some(pos) => self.simple(&format!("play {pos}")),
            None => self.simple("play"),
        }
    }

    fn play_id(&mut self, id: SongId) -> Result<(), PlaybackError> {
        self.simple(&format!("playid {id}"))
    }

    fn add_id(&mut self, uri: &str) -> Result<SongId, PlaybackError> {
        let pairs = self.command(&format!("addid {}", protocol::quote(uri)))?;
        protocol::parse_id(&pairs)
    }

    fn insert_id(&mut self, uri: &str, position: usize) -> Result<SongId, PlaybackError> {
        let pairs = self.command(&format!("addid {} {position}", protocol::quote(uri)))?;
        protocol::parse_id(&pairs)
    }

    fn delete_id(&mut self, id: SongId) -> Result<(), PlaybackError> {
        self.simple(&format!("deleteid {id}"))
    }

    fn pause(&mut self, paused: bool) -> Result<(), PlaybackError> {
        self.simple(if paused { "pause 1" } else { "pause 0" })
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.simple("stop")
    }

    fn next(&mut self) -> Result<(), PlaybackError> {
        self.simple("next")
    }

    fn previous(&mut self) -> Result<(), PlaybackError> {
        self.simple("previous")
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), PlaybackError> {
        self.simple(&format!("setvol {}", volume.min(100)))
    }

    fn seek(&mut self, target: SeekTarget) -> Result<(), PlaybackError> {
        match target {
            SeekTarget::Absolute(seconds) => self.simple(&format!("seekcur {seconds}")),
            SeekTarget::Relative(delta) => self.simple(&format!("seekcur {delta:+}")),
        }
    }

    fn status(&mut self) -> Result<PlayerStatus, PlaybackError> {
        let pairs = self.command("status")?;
        protocol::parse_status(&pairs)
    }

    fn current_song(&mut self) -> Result<Option<Song>, PlaybackError> {
        let pairs = self.command("currentsong")?;
        Ok(protocol::parse_songs(pairs).into_iter().next())
    }

    fn queue(&mut self) -> Result<Vec<Song>, PlaybackError> {
        let pairs = self.command("playlistinfo")?;
        Ok(protocol::parse_songs(pairs))
    }

    fn library(&mut self) -> Result<Vec<Song>, PlaybackError> {
        let pairs = self.command("listallinfo")?;
        Ok(protocol::parse_songs(pairs))
    }
}

impl Drop for MpdClient {
    fn drop(&mut self) {
        let _ = self.stream.write_all(b"close\n");
    }
}
