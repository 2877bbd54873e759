//! MPD text protocol framing and response parsing
//!
//! A request is one line. A response is a run of `key: value` lines ended by
//! `OK`, or an `ACK [error@command_listNum] {command} message` line.

use std::io::{self, BufRead};

use crate::model::{PlayState, PlaybackError, PlayerStatus, Song, SongId};

pub type Pairs = Vec<(String, String)>;

/// Quote an argument, escaping backslashes and double quotes.
pub fn quote(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// The human-readable part of an `ACK` line.
pub fn ack_message(line: &str) -> String {
    match line.split_once("} ") {
        Some((_, message)) => message.to_string(),
        None => line.trim_start_matches("ACK").trim().to_string(),
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String, PlaybackError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection closed").into());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read the `OK MPD <version>` line sent on connect.
pub fn read_greeting<R: BufRead>(reader: &mut R) -> Result<String, PlaybackError> {
    let line = read_line(reader)?;
    line.strip_prefix("OK MPD ")
        .map(str::to_string)
        .ok_or_else(|| PlaybackError::Protocol(format!("not an MPD server: {line}")))
}

/// Read one complete response.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Pairs, PlaybackError> {
    let mut pairs = Vec::new();
    loop {
        let line = read_line(reader)?;
        if line == "OK" {
            return Ok(pairs);
        }
        if line.starts_with("ACK ") {
            return Err(PlaybackError::Rejected(ack_message(&line)));
        }
        match line.split_once(": ") {
            Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
            None => return Err(PlaybackError::Protocol(line)),
        }
    }
}

/// Split a song listing into songs. Each song starts at a `file` key;
/// directories and playlists in the listing are skipped.
pub fn parse_songs(pairs: Pairs) -> Vec<Song> {
    let mut songs = Vec::new();
    let mut current: Option<Pairs> = None;
    for (key, value) in pairs {
        match key.as_str() {
            "file" => {
                if let Some(tags) = current.replace(vec![(key, value)]) {
                    songs.push(Song::from_tags(tags));
                }
            }
            "directory" | "playlist" => {
                if let Some(tags) = current.take() {
                    songs.push(Song::from_tags(tags));
                }
            }
            _ => {
                if let Some(tags) = current.as_mut() {
                    tags.push((key, value));
                }
            }
        }
    }
    if let Some(tags) = current {
        songs.push(Song::from_tags(tags));
    }
    songs
}

fn flag(value: &str) -> bool {
    value != "0"
}

pub fn parse_status(pairs: &Pairs) -> Result<PlayerStatus, PlaybackError> {
    let mut status = PlayerStatus::default();
    for (key, value) in pairs {
        match key.as_str() {
            "state" => {
                status.state = match value.as_str() {
                    "play" => PlayState::Play,
                    "pause" => PlayState::Pause,
                    "stop" => PlayState::Stop,
                    other => {
                        return Err(PlaybackError::Protocol(format!("unknown state '{other}'")));
                    }
                }
            }
            "volume" => status.volume = value.parse::<i32>().ok().and_then(|v| u8::try_from(v).ok()),
            "songid" => status.song_id = value.parse().ok(),
            "elapsed" => status.elapsed = value.parse().ok(),
            "duration" => status.duration = value.parse().ok(),
            "repeat" => status.repeat = flag(value),
            "random" => status.random = flag(value),
            "single" => status.single = flag(value),
            "consume" => status.consume = flag(value),
            _ => {}
        }
    }
    Ok(status)
}

/// The `Id` returned by `addid`.
pub fn parse_id(pairs: &Pairs) -> Result<SongId, PlaybackError> {
    pairs
        .iter()
        .find(|(key, _)| key == "Id")
        .and_then(|(_, value)| value.parse().ok())
        .ok_or_else(|| PlaybackError::Protocol("addid returned no Id".to_string()))
}
